use mockall::mock;
use topup_payment_engine::{
    db_types::{DedupKey, Order, PaymentEvent, Product, ReconciledOrder, User},
    traits::{PaymentGatewayDatabase, PaymentGatewayError},
};

mock! {
    pub PaymentGateway {}
    impl Clone for PaymentGateway {
        fn clone(&self) -> Self;
    }
    impl PaymentGatewayDatabase for PaymentGateway {
        fn url(&self) -> &str;
        async fn fetch_product(&self, product_id: &str) -> Result<Option<Product>, PaymentGatewayError>;
        async fn fetch_user_by_gaming_id(&self, gaming_id: &str) -> Result<Option<User>, PaymentGatewayError>;
        async fn order_id_for_dedup_key(&self, key: &DedupKey) -> Result<Option<i64>, PaymentGatewayError>;
        async fn reconcile_payment(&self, event: &PaymentEvent) -> Result<ReconciledOrder, PaymentGatewayError>;
        async fn fetch_order_by_id(&self, id: i64) -> Result<Option<Order>, PaymentGatewayError>;
        async fn promote_gaming_id(&self, gaming_id: &str) -> Result<(), PaymentGatewayError>;
    }
}
