use gts_common::Rupees;

use crate::db_types::{OrderStatusType, Product};

/// How many coins the buyer redeems against this purchase.
///
/// Coin products are never paid for with coins, and a buyer can redeem at most the smaller of their balance and the
/// product's redeemable cap. `user_coins` must be the balance read inside the reconciliation transaction.
pub fn coins_used(product: &Product, user_coins: i64) -> i64 {
    if product.is_coin_product {
        0
    } else {
        user_coins.min(product.coins_applicable.unwrap_or(0))
    }
}

/// The price recorded on the order.
///
/// When the gateway reports a settled amount (PhonePe), that amount is authoritative: it is money already
/// received. Otherwise the price comes from the product record: the cost basis for coin grants, or the list price
/// less the coin redemption (1 coin = ₹1).
pub fn final_price(settled_amount: Option<Rupees>, product: &Product, coins_used: i64) -> Rupees {
    if let Some(amount) = settled_amount {
        return amount;
    }
    if product.is_coin_product {
        product.purchase_price.unwrap_or(product.price)
    } else {
        product.price - Rupees::from_rupees(coins_used)
    }
}

/// Coin grants settle immediately; everything else awaits fulfilment.
pub fn terminal_status(product: &Product) -> OrderStatusType {
    if product.is_coin_product {
        OrderStatusType::Completed
    } else {
        OrderStatusType::Processing
    }
}

/// Flat 50% commission credited to the referrer's wallet on completed coin-product purchases.
pub fn referral_reward(final_price: Rupees) -> Rupees {
    final_price.percent(50)
}
