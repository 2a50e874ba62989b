pub mod backend_config;
pub mod builder_config;
pub mod defaults;
pub mod export_config;
pub mod metlab_config;
pub mod observability_config;

pub use backend_config::BackendConfig;
pub use builder_config::BuilderConfig;
pub use export_config::ExportConfig;
pub use metlab_config::{CliOverrides, MetlabConfig};
pub use observability_config::ObservabilityConfig;
