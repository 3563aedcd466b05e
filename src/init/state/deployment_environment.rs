#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeploymentEnvironment {
    Local,
    Dev,
    Staging,
    Prod,
}

impl DeploymentEnvironment {
    /// Unset means production; unknown values fall back to local.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(s) => match s.trim().to_ascii_lowercase().as_str() {
                "local" | "localhost" => DeploymentEnvironment::Local,
                "dev" | "develop" | "development" => DeploymentEnvironment::Dev,
                "staging" | "stage" | "stg" => DeploymentEnvironment::Staging,
                "prd" | "prod" | "production" => DeploymentEnvironment::Prod,
                _ => DeploymentEnvironment::Local,
            },
            None => DeploymentEnvironment::Prod,
        }
    }

    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var("CURR_ENV").ok().as_deref())
    }

    /// Session cookies only go out over TLS outside local runs.
    pub fn secure_cookies(&self) -> bool {
        !matches!(self, DeploymentEnvironment::Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases_and_defaults() {
        use DeploymentEnvironment::*;

        assert_eq!(DeploymentEnvironment::from_env_value(Some("PRD")), Prod);
        assert_eq!(DeploymentEnvironment::from_env_value(Some("stg")), Staging);
        assert_eq!(DeploymentEnvironment::from_env_value(Some("develop")), Dev);
        assert_eq!(DeploymentEnvironment::from_env_value(Some("whatever")), Local);
        assert_eq!(DeploymentEnvironment::from_env_value(None), Prod);
        assert!(!Local.secure_cookies());
        assert!(Prod.secure_cookies());
    }
}
