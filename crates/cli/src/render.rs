//! Terminal rendering for catalog and cart views.

#![allow(clippy::print_stdout)]

use blogbox_core::{Cart, Price, Product};

pub fn message(text: &str) {
    println!("{text}");
}

/// One line per product: id, name, and price. Sale items also show the
/// regular price.
pub fn product_list(products: &[Product]) {
    if products.is_empty() {
        println!("No products available.");
        return;
    }
    for product in products {
        println!("{:>4}  {:<32} {}", product.id.as_i32(), product.name, price_label(product));
    }
}

pub fn product_detail(product: &Product) {
    println!("#{} {}", product.id, product.name);
    println!("Price: {}", price_label(product));
    if let Some(description) = &product.description {
        println!();
        println!("{description}");
    }
    if let Some(image_url) = &product.image_url {
        println!("Image: {image_url}");
    }
}

pub fn cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for item in cart.items() {
        println!(
            "{:>4}  {:<32} {:>3} x {:>10} = {:>10}",
            item.product.id.as_i32(),
            item.product.name,
            item.quantity,
            Price::usd(item.unit_price()).display(),
            Price::usd(item.line_total()).display(),
        );
    }
    println!(
        "{} item(s), total {}",
        cart.item_count(),
        Price::usd(cart.total()).display()
    );
}

fn price_label(product: &Product) -> String {
    let current = product.display_price().display();
    if product.effective_price() == product.price {
        current
    } else {
        format!("{current} (was {})", Price::usd(product.price).display())
    }
}
