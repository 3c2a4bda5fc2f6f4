//! Counter transitions for a single product.
//!
//! Every function here works on an owned snapshot and returns the value the
//! repository should persist; nothing in this module touches storage.

use crate::{
    domain::response::ErrorReason,
    model::product::{NewProduct, Product},
};

fn ensure_positive(quantity: i64) -> Result<(), ErrorReason> {
    if quantity <= 0 {
        return Err(ErrorReason::QuantityInvalid);
    }
    Ok(())
}

// in_stock - reserved - quantity must stay >= 0
fn ensure_available(product: &Product, quantity: i64) -> Result<(), ErrorReason> {
    if product.available_quantity() < i128::from(quantity) {
        return Err(ErrorReason::NotEnoughQuantity);
    }
    Ok(())
}

/// Allocates `quantity` units of on-hand stock to a pending order.
pub fn reserve(product: &Product, quantity: i64) -> Result<Product, ErrorReason> {
    ensure_positive(quantity)?;
    ensure_available(product, quantity)?;

    Ok(Product {
        reserved_quantity: product.reserved_quantity + quantity,
        ..product.clone()
    })
}

/// Removes `quantity` units from both counters.
///
/// Only the available slack is checked. Shipping more than is reserved
/// therefore leaves `reserved_quantity` negative; pushing it below
/// `i64::MIN` is reported as an invalid quantity.
pub fn ship(product: &Product, quantity: i64) -> Result<Product, ErrorReason> {
    ensure_positive(quantity)?;
    ensure_available(product, quantity)?;

    let reserved_quantity = product
        .reserved_quantity
        .checked_sub(quantity)
        .ok_or(ErrorReason::QuantityInvalid)?;

    Ok(Product {
        reserved_quantity,
        in_stock_quantity: product.in_stock_quantity - quantity,
        ..product.clone()
    })
}

/// Adds `quantity` units of on-hand stock. There is no upper bound short of
/// counter overflow, which is reported as an invalid quantity.
pub fn restock(product: &Product, quantity: i64) -> Result<Product, ErrorReason> {
    ensure_positive(quantity)?;

    let in_stock_quantity = product
        .in_stock_quantity
        .checked_add(quantity)
        .ok_or(ErrorReason::QuantityInvalid)?;

    Ok(Product {
        in_stock_quantity,
        ..product.clone()
    })
}

/// Builds the row to insert for a validated create request. Reserved stock
/// always starts at zero.
pub fn new_product(name: String, in_stock_quantity: i64) -> NewProduct {
    NewProduct {
        name,
        in_stock_quantity,
        reserved_quantity: 0,
    }
}
