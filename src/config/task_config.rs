/// Parameters substituted into the target recipes.
///
/// Values are taken verbatim from the environment. Nothing is validated:
/// a bad port or image name is for the container runtime to reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskConfig {
    /// Container runtime program (e.g. `docker` or `podman`)
    pub runtime: String,
    /// Build file passed to `build -f`
    pub build_file: String,
    pub image: String,
    pub container: String,
    /// Host port published to the database port inside the container
    pub port: String,
    pub password: String,
    pub database: String,
}

impl TaskConfig {
    pub const DEFAULT_RUNTIME: &'static str = "docker";
    pub const DEFAULT_BUILD_FILE: &'static str = "Dockerfile";
    pub const DEFAULT_IMAGE: &'static str = "openrecall-db";
    pub const DEFAULT_PORT: &'static str = "5432";
    pub const DEFAULT_PASSWORD: &'static str = "openrecall";
    pub const DEFAULT_DATABASE: &'static str = "openrecall";

    /// Read the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let image = get("IMAGE_NAME", Self::DEFAULT_IMAGE);
        // The plain recipes name the container after the image
        let container = lookup("CONTAINER_NAME").unwrap_or_else(|| image.clone());

        Self {
            runtime: get("CONTAINER_RUNTIME", Self::DEFAULT_RUNTIME),
            build_file: get("DOCKERFILE", Self::DEFAULT_BUILD_FILE),
            container,
            image,
            port: get("DB_PORT", Self::DEFAULT_PORT),
            password: get("DB_PASSWORD", Self::DEFAULT_PASSWORD),
            database: get("DB_NAME", Self::DEFAULT_DATABASE),
        }
    }
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
