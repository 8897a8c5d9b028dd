//! Cart properties exercised through the public store API.

use std::sync::Arc;

use rusty_money::{Money, iso};
use testresult::TestResult;

use storefront::prelude::*;

fn empty_cart() -> Result<CartStore, Box<dyn std::error::Error>> {
    Ok(CartStore::restore(
        Arc::new(Catalog::seeded()?),
        Arc::new(MemoryStore::new()),
    )?)
}

#[test]
fn quantity_equals_number_of_adds() -> TestResult {
    for adds in 1..=8_u32 {
        let mut cart = empty_cart()?;

        for _ in 0..adds {
            cart.add(ProductId::new(3))?;
        }

        assert_eq!(cart.cart().len(), 1);
        assert_eq!(cart.cart().quantity(ProductId::new(3)), adds);
    }

    Ok(())
}

#[test]
fn no_line_ever_reaches_zero() -> TestResult {
    let mut cart = empty_cart()?;

    cart.add(ProductId::new(1))?;
    cart.add(ProductId::new(1))?;
    cart.add(ProductId::new(2))?;

    for delta in [-1, 3, -5, 1, -1] {
        cart.update_quantity(ProductId::new(1), delta)?;

        assert!(cart.cart().lines().iter().all(|line| line.quantity > 0));
    }

    assert_eq!(cart.cart().quantity(ProductId::new(1)), 0);
    assert_eq!(cart.count(), 1);

    Ok(())
}

#[test]
fn total_is_recomputed_after_each_mutation() -> TestResult {
    let mut cart = empty_cart()?;

    cart.add(ProductId::new(4))?;
    assert_eq!(cart.total(), Money::from_minor(899_99, iso::BRL));

    cart.update_quantity(ProductId::new(4), 2)?;
    assert_eq!(cart.total(), Money::from_minor(3 * 899_99, iso::BRL));

    cart.add(ProductId::new(6))?;
    assert_eq!(cart.total(), Money::from_minor(3 * 899_99 + 2199_99, iso::BRL));

    cart.remove(ProductId::new(4))?;
    assert_eq!(cart.total(), Money::from_minor(2199_99, iso::BRL));

    Ok(())
}

#[test]
fn snapshot_survives_a_restart() -> TestResult {
    let catalog = Arc::new(Catalog::seeded()?);
    let store = Arc::new(MemoryStore::new());

    let mut first = CartStore::restore(catalog.clone(), store.clone())?;
    first.add(ProductId::new(2))?;
    first.add(ProductId::new(5))?;
    first.add(ProductId::new(2))?;

    let second = CartStore::restore(catalog, store)?;

    assert_eq!(second.cart(), first.cart());
    assert_eq!(second.total(), first.total());

    Ok(())
}
