use std::fmt;
use std::str::FromStr;

/// Environment variable that selects the [`AcquireStrategy`], or disables
/// the runtime fix mode with `0`
pub const FIX_MODE_ENV: &str = "CDP_CONTEXT_FIX_MODE";

/// Environment variable that enables diagnostics of the id acquisition
pub const DEBUG_ENV: &str = "CDP_CONTEXT_DEBUG";

/// How an execution context that has no id yet learns its id.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum AcquireStrategy {
    /// Create isolated worlds directly and find the main world with a one time
    /// binding handshake
    #[default]
    AddBinding,
    /// Always create a new isolated world for the frame
    AlwaysIsolated,
    /// Briefly enable the `Runtime` domain and pick the id from the
    /// `Runtime.executionContextCreated` events
    EnableDisable,
}

impl AcquireStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcquireStrategy::AddBinding => "addBinding",
            AcquireStrategy::AlwaysIsolated => "alwaysIsolated",
            AcquireStrategy::EnableDisable => "enableDisable",
        }
    }
}

impl fmt::Display for AcquireStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AcquireStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "addBinding" => Ok(AcquireStrategy::AddBinding),
            "alwaysIsolated" => Ok(AcquireStrategy::AlwaysIsolated),
            "enableDisable" => Ok(AcquireStrategy::EnableDisable),
            s => Err(format!("Unknown context acquire strategy: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    /// How missing context ids are acquired. Defaults to
    /// [`AcquireStrategy::AddBinding`].
    strategy: AcquireStrategy,
    /// When set, the context does not tear itself down on
    /// `Runtime.executionContextDestroyed` and
    /// `Runtime.executionContextsCleared`, and recovers its id on the next
    /// evaluation instead. Defaults to true.
    runtime_fix: bool,
    /// Log every step of the id acquisition.
    debug: bool,
}

impl ContextConfig {
    pub fn builder() -> ContextConfigBuilder {
        ContextConfigBuilder::default()
    }

    /// Read the configuration from `CDP_CONTEXT_FIX_MODE` and
    /// `CDP_CONTEXT_DEBUG`
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(FIX_MODE_ENV).ok().as_deref(),
            std::env::var(DEBUG_ENV).ok().as_deref(),
        )
    }

    pub(crate) fn from_vars(fix_mode: Option<&str>, debug: Option<&str>) -> Self {
        let mut builder = Self::builder();
        match fix_mode {
            None | Some("") => {}
            Some("0") => builder = builder.runtime_fix(false),
            Some(mode) => match mode.parse() {
                Ok(strategy) => builder = builder.strategy(strategy),
                Err(err) => {
                    tracing::warn!("{}, using {}", err, AcquireStrategy::default());
                }
            },
        }
        if let Some(debug) = debug {
            builder = builder.debug(!matches!(debug, "" | "0" | "false"));
        }
        builder.build()
    }

    pub fn strategy(&self) -> AcquireStrategy {
        self.strategy
    }

    pub fn runtime_fix(&self) -> bool {
        self.runtime_fix
    }

    pub fn debug(&self) -> bool {
        self.debug
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, Clone)]
pub struct ContextConfigBuilder {
    strategy: AcquireStrategy,
    runtime_fix: bool,
    debug: bool,
}

impl Default for ContextConfigBuilder {
    fn default() -> Self {
        Self {
            strategy: AcquireStrategy::default(),
            runtime_fix: true,
            debug: false,
        }
    }
}

impl ContextConfigBuilder {
    pub fn strategy(mut self, strategy: AcquireStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn runtime_fix(mut self, runtime_fix: bool) -> Self {
        self.runtime_fix = runtime_fix;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn build(self) -> ContextConfig {
        ContextConfig {
            strategy: self.strategy,
            runtime_fix: self.runtime_fix,
            debug: self.debug,
        }
    }
}
