//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface a scaffolding binary implements to point
//! the shared workflow at its own template organization and registry.

/// Configuration trait for a scaffolding CLI product
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - The organization whose repositories are offered as templates
/// - Registry location and its environment override
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the user agent)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Organization (or user) owning the template repositories
    fn organization(&self) -> &'static str;

    /// Default base URL of the template registry API
    fn default_registry_url(&self) -> &'static str;

    /// Environment variable name for overriding the registry URL
    fn registry_url_env(&self) -> &'static str;

    /// Environment variable holding an optional API token
    fn token_env(&self) -> &'static str {
        "GITHUB_TOKEN"
    }

    /// Commands to show once the project has been created
    fn next_steps(&self, project_name: &str) -> Vec<String>;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
