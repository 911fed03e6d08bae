use std::sync::{Mutex, MutexGuard, PoisonError};

/// Composes the utility script that is injected into every execution context.
///
/// The script is a module whose default export can be amended with additional
/// statements. Contexts ask the injector on every access whether their copy of
/// the script is outdated.
#[derive(Debug)]
pub struct ScriptInjector {
    source: String,
    state: Mutex<InjectorState>,
}

#[derive(Debug, Default)]
struct InjectorState {
    amendments: Vec<String>,
    /// Whether the amendments changed since the script was last injected
    updated: bool,
}

impl ScriptInjector {
    /// `source` is a CommonJS module body that assigns `module.exports.default`
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            state: Mutex::new(InjectorState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, InjectorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a statement that is applied to the default export
    pub fn append(&self, statement: impl Into<String>) {
        let statement = statement.into();
        let mut state = self.lock();
        if !state.amendments.contains(&statement) {
            state.amendments.push(statement);
            state.updated = true;
        }
    }

    /// Remove a previously appended statement
    pub fn pop(&self, statement: &str) {
        let mut state = self.lock();
        let len = state.amendments.len();
        state.amendments.retain(|s| s != statement);
        if state.amendments.len() != len {
            state.updated = true;
        }
    }

    /// The script to evaluate if the amendments changed since the last
    /// injection or `force` is set
    pub fn inject(&self, force: bool) -> Option<String> {
        let mut state = self.lock();
        if !state.updated && !force {
            return None;
        }
        state.updated = false;
        Some(self.compose(&state.amendments))
    }

    fn compose(&self, amendments: &[String]) -> String {
        let amendments = amendments
            .iter()
            .map(|statement| format!("({})(module.exports.default);", statement))
            .collect::<Vec<_>>()
            .join("");
        format!(
            "(() => {{\n  const module = {{}};\n  {}\n  {}\n  return module.exports.default;\n}})()",
            self.source, amendments
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inject_only_when_updated() {
        let injector = ScriptInjector::new("module.exports = { default: {} };");
        assert!(injector.inject(false).is_none());
        let script = injector.inject(true).unwrap();
        assert!(script.starts_with("(() => {"));
        assert!(script.contains("module.exports = { default: {} };"));
        assert!(script.ends_with("return module.exports.default;\n})()"));

        injector.append("(u) => { u.extra = 1; }");
        injector.append("(u) => { u.extra = 1; }");
        let script = injector.inject(false).unwrap();
        assert_eq!(
            script.matches("((u) => { u.extra = 1; })(module.exports.default);").count(),
            1
        );
        assert!(injector.inject(false).is_none());

        injector.pop("(u) => { u.extra = 1; }");
        let script = injector.inject(false).unwrap();
        assert!(!script.contains("u.extra"));
        injector.pop("(u) => { u.extra = 1; }");
        assert!(injector.inject(false).is_none());
    }
}
