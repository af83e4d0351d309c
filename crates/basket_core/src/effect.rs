/// Side effects requested by [`crate::update`] and executed by the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the product catalog; the result must be reported back tagged
    /// with the same `request_id`.
    FetchProducts { request_id: crate::RequestId },
}
