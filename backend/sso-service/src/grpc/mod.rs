/// gRPC server module for sso-service
///
/// Exports:
/// - SsoGrpcServer: Auth service implementation
/// - correlation_interceptor: correlation-id propagation
/// - sso: Generated protobuf types from sso.proto
pub mod interceptor;
pub mod server;

pub use interceptor::{correlation_interceptor, CorrelationId, CORRELATION_HEADER};
pub use server::sso;
pub use server::SsoGrpcServer;
