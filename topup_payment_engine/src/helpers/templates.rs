use gts_common::Rupees;

/// The user-facing audit message stored with every reconciled order. Coin grants and pending game-item orders get
/// distinct wording.
pub fn notification_message(product_name: &str, final_price: Rupees, is_coin_product: bool) -> String {
    if is_coin_product {
        format!(
            "Your purchase of {product_name} for {final_price} was successful! The coins have been added to your \
             account."
        )
    } else {
        format!(
            "Your payment of {final_price} for \"{product_name}\" has been successfully received. Currently, it's \
             under processing."
        )
    }
}
