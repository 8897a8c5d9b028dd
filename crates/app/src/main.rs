//! Storefront CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use storefront::{
    cart::{Cart, CartError, CartObserver, CartStore},
    checkout::{PaymentMethod, PaymentReceipt},
    pricing::display_amount,
    products::ProductId,
};
use storefront_app::{config::StorefrontConfig, context::AppContext, logging};
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront cart and checkout", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: StorefrontConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the catalog
    Products,

    /// Show the cart
    Cart,

    /// Add one unit of a product to the cart
    Add { id: u32 },

    /// Remove a product from the cart
    Remove { id: u32 },

    /// Change a product's quantity by a signed amount
    Quantity {
        id: u32,

        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },

    /// Empty the cart
    Clear,

    /// Pay for the cart
    Checkout {
        /// Payment method (pix, card, boleto)
        #[arg(short, long)]
        method: Option<PaymentMethod>,
    },

    /// Sign in
    Login(LoginArgs),

    /// Create an account and sign in
    Register(RegisterArgs),

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,
}

#[derive(Debug, Args)]
struct LoginArgs {
    #[arg(long)]
    email: String,

    #[arg(long)]
    password: String,
}

#[derive(Debug, Args)]
struct RegisterArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    password: String,
}

/// Prints the cart badge after every mutation.
struct CartBadge;

impl CartObserver for CartBadge {
    fn cart_changed(&self, cart: &Cart) {
        println!("cart: {} item(s)", cart.count());
    }
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = logging::init(&cli.config.logging) {
        eprintln!("failed to initialise logging: {error}");
    }

    if let Err(message) = run(cli).await {
        error!("{message}");
        eprintln!("{message}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let ctx = AppContext::from_config(&cli.config)
        .map_err(|error| format!("failed to start storefront: {error}"))?;

    match cli.command {
        Commands::Products => {
            list_products(&ctx);
            Ok(())
        }
        Commands::Cart => show_cart(&open_cart(&ctx)?),
        Commands::Add { id } => notify(add_to_cart(&mut open_cart(&ctx)?, ProductId::new(id))),
        Commands::Remove { id } => {
            notify(remove_from_cart(&mut open_cart(&ctx)?, ProductId::new(id)))
        }
        Commands::Quantity { id, delta } => notify(change_quantity(
            &mut open_cart(&ctx)?,
            ProductId::new(id),
            delta,
        )),
        Commands::Clear => notify(clear_cart(&mut open_cart(&ctx)?)),
        Commands::Checkout { method } => checkout(&ctx, method).await,
        Commands::Login(args) => {
            let user = ctx
                .session
                .login(&args.email, &args.password)
                .map_err(|error| error.to_string())?;

            println!("signed in as {}", user.email);
            Ok(())
        }
        Commands::Register(args) => {
            let user = ctx
                .session
                .register(&args.name, &args.email, &args.password)
                .map_err(|error| error.to_string())?;

            println!("welcome, {}", user.name);
            Ok(())
        }
        Commands::Logout => {
            ctx.session.logout().map_err(|error| error.to_string())?;

            println!("signed out");
            Ok(())
        }
        Commands::Whoami => {
            match ctx.session.current().map_err(|error| error.to_string())? {
                Some(user) => println!("{} <{}>", user.name, user.email),
                None => println!("not signed in"),
            }
            Ok(())
        }
    }
}

fn open_cart(ctx: &AppContext) -> Result<CartStore, String> {
    let mut cart = ctx
        .cart()
        .map_err(|error| format!("failed to restore cart: {error}"))?;

    cart.subscribe(CartBadge);

    Ok(cart)
}

fn notify(notice: Result<String, CartError>) -> Result<(), String> {
    let notice = notice.map_err(|error| error.to_string())?;

    println!("{notice}");

    Ok(())
}

fn add_to_cart(cart: &mut CartStore, id: ProductId) -> Result<String, CartError> {
    let Some(name) = cart.catalog().get(id).map(|product| product.name.clone()) else {
        return Ok(format!("product {id} not found"));
    };

    cart.add(id)?;

    Ok(format!("added {name} to the cart"))
}

fn remove_from_cart(cart: &mut CartStore, id: ProductId) -> Result<String, CartError> {
    let present = cart.cart().quantity(id) > 0;

    cart.remove(id)?;

    Ok(if present {
        format!("removed product {id} from the cart")
    } else {
        format!("product {id} is not in the cart")
    })
}

fn change_quantity(cart: &mut CartStore, id: ProductId, delta: i64) -> Result<String, CartError> {
    if cart.cart().quantity(id) == 0 {
        return Ok(format!("product {id} is not in the cart"));
    }

    cart.update_quantity(id, delta)?;

    Ok(match cart.cart().quantity(id) {
        0 => format!("removed product {id} from the cart"),
        quantity => format!("product {id} quantity is now {quantity}"),
    })
}

fn clear_cart(cart: &mut CartStore) -> Result<String, CartError> {
    cart.clear()?;

    Ok("cart cleared".to_string())
}

fn list_products(ctx: &AppContext) {
    for product in ctx.catalog.iter() {
        println!(
            "[{}] {} ({}) {}  * {}",
            product.id,
            product.name,
            product.category,
            display_amount(&product.price),
            product.rating
        );
        println!("    {}", product.description);

        if !product.features.is_empty() {
            println!("    {}", product.features.join(" | "));
        }
    }
}

fn show_cart(cart: &CartStore) -> Result<(), String> {
    if cart.is_empty() {
        println!("your cart is empty");
        return Ok(());
    }

    for line in cart.priced_lines() {
        println!(
            "[{}] {} x{}  {}",
            line.product.id,
            line.product.name,
            line.quantity,
            display_amount(&line.total())
        );
    }

    println!("total: {}", display_amount(&cart.total()));

    Ok(())
}

async fn checkout(ctx: &AppContext, method: Option<PaymentMethod>) -> Result<(), String> {
    let mut cart = open_cart(ctx)?;

    let user = ctx.session.current().map_err(|error| error.to_string())?;

    println!("processing payment...");

    let receipt = ctx
        .checkout
        .checkout(&mut cart, method, user.as_ref())
        .await
        .map_err(|error| format!("payment failed: {error}"))?;

    match receipt {
        PaymentReceipt::Pix {
            transaction_id,
            amount,
            qr_code,
            pix_code,
        } => {
            match transaction_id {
                Some(transaction_id) => println!("PIX payment {transaction_id} created for R$ {amount}"),
                None => println!("PIX payment created for R$ {amount}"),
            }
            println!("scan the QR code to pay: {qr_code}");

            if let Some(pix_code) = pix_code {
                println!("PIX copy-paste code: {pix_code}");
            }
        }
        PaymentReceipt::Processed {
            transaction_id,
            amount,
            payment_url,
        } => {
            println!("payment processed");
            if let Some(transaction_id) = transaction_id {
                println!("id: {transaction_id}");
            }
            println!("amount: R$ {amount}");

            if let Some(payment_url) = payment_url {
                println!("complete payment at: {payment_url}");
            }
        }
    }

    Ok(())
}
