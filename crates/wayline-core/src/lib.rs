//! # Wayline Core
//!
//! Interceptor implementations and chain composition.
//!
//! ## Components
//!
//! - [`ActivityChain`], [`WorkflowChain`], [`OutboundChain`] - explicit
//!   ordered chains per execution kind
//! - [`InterceptorStack`] - builds chains from interceptor factories
//! - [`MetadataContextInterceptor`] - propagates ambient metadata through
//!   call arguments
//! - [`RootWorkflowNameInterceptor`] and [`NodeIdInterceptor`] - move
//!   single-key argument carriers into the header channel
//! - [`is_serialize_by_default_serializer`] - codec eligibility analysis
//! - [`JsonPayloadConverter`] - default payload converter for headers

pub mod binder;
pub mod carrier;
pub mod chain;
pub mod converter;
pub mod eligibility;
pub mod metadata;
pub mod stack;

#[cfg(test)]
pub(crate) mod test_support;

pub use binder::DefaultBinder;
pub use carrier::{NodeIdInterceptor, RootWorkflowNameInterceptor};
pub use chain::{ActivityChain, OutboundChain, WorkflowChain};
pub use converter::{JSON_PLAIN_ENCODING, JsonPayloadConverter};
pub use eligibility::{CodecStrategy, is_serialize_by_default_serializer, select_codec};
pub use metadata::{
    MetadataContextActivityInbound, MetadataContextInterceptor, MetadataContextWorkflowInbound,
    MetadataContextWorkflowOutbound, MetadataGetter, extract_metadata, merge_metadata,
};
pub use stack::InterceptorStack;
