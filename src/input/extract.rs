//! Extraction boundary trait for web integration.

use super::RequestAdapter;

/// Collects the untrusted parts of a framework-specific request.
///
/// Framework integrations implement this trait to copy query parameters,
/// body fields, cookies and server variables into a [`RequestAdapter`].
///
/// # Design Notes
///
/// This trait intentionally does NOT clean anything. It only maps framework
/// types to [`InputValue`](crate::InputValue) trees; cleaning happens in
/// [`RequestAdapter::into_input`].
///
/// # Examples
///
/// ```
/// use request_hygiene::input::{ExtractInput, RequestAdapter};
/// use std::collections::BTreeMap;
///
/// struct MyFrameworkRequest {
///     id: String,
///     query: BTreeMap<String, String>,
/// }
///
/// impl ExtractInput for MyFrameworkRequest {
///     fn extract_input(&self) -> RequestAdapter {
///         let mut adapter = RequestAdapter::new(self.id.clone());
///         for (k, v) in &self.query {
///             adapter.add_query_param(k.clone(), v.as_str());
///         }
///         adapter
///     }
/// }
/// ```
pub trait ExtractInput {
    /// Copies all untrusted inputs into an adapter.
    fn extract_input(&self) -> RequestAdapter;
}
