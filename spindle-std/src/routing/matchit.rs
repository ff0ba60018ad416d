//! Matchit-based pattern store.
//!
//! Delegates matching to the `matchit` radix tree. `{name}` parameters map
//! one-for-one; a trailing `/*` becomes a named catch-all and is reported
//! back under [`WILDCARD`].
//!
//! # Limitations
//!
//! `matchit` catch-alls need at least one character, so `/files/*` does not
//! match `/files/`. [`Tree`](super::Tree) matches it with an empty capture.

use ::matchit::Router as InnerRouter;
use spindle_core::{
    BoxHandler, Endpoints, MethodSet, Params, PatternError, PatternStore, Route, RouteInfo,
    WILDCARD,
};
use std::{collections::HashMap, fmt};

const CATCH_ALL: &str = "__wildcard";

/// Rewrite a route pattern into `matchit` syntax.
fn translate(pattern: &str) -> Result<String, PatternError> {
    match pattern.find('*') {
        None => Ok(pattern.to_owned()),
        Some(pos) if pos + 1 != pattern.len() => {
            Err(PatternError::MisplacedWildcard(pattern.to_owned()))
        }
        Some(pos) if !pattern[..pos].ends_with('/') => Err(PatternError::Unsupported {
            pattern: pattern.to_owned(),
            reason: "wildcard must follow '/'".to_owned(),
        }),
        Some(pos) => Ok(format!("{}{{*{CATCH_ALL}}}", &pattern[..pos])),
    }
}

fn insert_translated(
    router: &mut InnerRouter<usize>,
    pattern: &str,
    index: usize,
) -> Result<(), PatternError> {
    router
        .insert(translate(pattern)?, index)
        .map_err(|e| PatternError::Unsupported {
            pattern: pattern.to_owned(),
            reason: e.to_string(),
        })
}

/// A [`PatternStore`] backed by `matchit`.
#[derive(Default)]
pub struct MatchitStore {
    router: InnerRouter<usize>,
    routes: Vec<Route>,
    by_pattern: HashMap<String, usize>,
}

impl MatchitStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PatternStore for MatchitStore {
    fn insert(
        &mut self,
        methods: MethodSet,
        pattern: &str,
        handler: BoxHandler,
    ) -> Result<&mut Route, PatternError> {
        let index = match self.by_pattern.get(pattern) {
            Some(index) => *index,
            None => {
                let index = self.routes.len();
                insert_translated(&mut self.router, pattern, index)?;
                self.routes.push(Route::new(pattern));
                self.by_pattern.insert(pattern.to_owned(), index);
                index
            }
        };

        let route = &mut self.routes[index];
        route.endpoints_mut().insert(methods, handler);
        Ok(route)
    }

    fn validate(&self, patterns: &[&str]) -> Result<(), PatternError> {
        // Conflicts depend on what is already stored, so try the inserts on a
        // scratch copy.
        let mut scratch = self.router.clone();
        for pattern in patterns {
            if !self.by_pattern.contains_key(*pattern) {
                insert_translated(&mut scratch, pattern, usize::MAX)?;
            }
        }
        Ok(())
    }

    fn find(&self, params: &mut Params, path: &str) -> Option<&Endpoints> {
        let matched = self.router.at(path).ok()?;
        for (key, value) in matched.params.iter() {
            let key = if key == CATCH_ALL { WILDCARD } else { key };
            params.set(key, value);
        }
        Some(self.routes[*matched.value].endpoints())
    }

    fn has_pattern(&self, pattern: &str) -> bool {
        self.by_pattern.contains_key(pattern)
    }

    fn routes(&self) -> Vec<RouteInfo> {
        self.routes.iter().map(Route::info).collect()
    }

    fn len(&self) -> usize {
        self.routes.len()
    }
}

impl fmt::Debug for MatchitStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchitStore")
            .field("routes", &self.routes.len())
            .finish()
    }
}
