//! Character trie pattern store.
//!
//! Static text is stored one character per edge, parameters as named
//! children, and a trailing `*` as a catch-all leaf. Lookup prefers static
//! edges, then parameters, then the catch-all, and backtracks when a branch
//! dead-ends.

use spindle_core::{
    BoxHandler, Endpoints, MethodSet, Params, PatternError, PatternStore, Route, RouteInfo,
    WILDCARD,
};
use std::{
    collections::{BTreeMap, HashMap},
    fmt,
};

enum Token {
    Static(char),
    Param(String),
}

/// Split `pattern` into trie edges. The flag is set for a trailing `*`.
fn parse(pattern: &str) -> Result<(Vec<Token>, bool), PatternError> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('/') | None => {
                            return Err(PatternError::UnclosedParam(pattern.to_owned()));
                        }
                        Some(c) => name.push(c),
                    }
                }
                if name.is_empty() {
                    return Err(PatternError::EmptyParamName(pattern.to_owned()));
                }
                if chars.peek().is_some_and(|next| *next != '/') {
                    return Err(PatternError::ParamSuffix(pattern.to_owned()));
                }
                tokens.push(Token::Param(name));
            }
            '*' => {
                if chars.peek().is_some() {
                    return Err(PatternError::MisplacedWildcard(pattern.to_owned()));
                }
                return Ok((tokens, true));
            }
            c => tokens.push(Token::Static(c)),
        }
    }

    Ok((tokens, false))
}

#[derive(Default)]
struct Node {
    statics: BTreeMap<char, Node>,
    params: BTreeMap<String, Node>,
    route: Option<usize>,
    catch_all: Option<usize>,
}

impl Node {
    fn find<'n, 'p>(
        &'n self,
        path: &'p str,
        captures: &mut Vec<(&'n str, &'p str)>,
    ) -> Option<usize> {
        let Some(c) = path.chars().next() else {
            if self.route.is_some() {
                return self.route;
            }
            if self.catch_all.is_some() {
                captures.push((WILDCARD, ""));
            }
            return self.catch_all;
        };

        if let Some(child) = self.statics.get(&c) {
            if let Some(found) = child.find(&path[c.len_utf8()..], captures) {
                return Some(found);
            }
        }

        let end = path.find('/').unwrap_or(path.len());
        if end > 0 {
            for (name, child) in &self.params {
                let mark = captures.len();
                captures.push((name.as_str(), &path[..end]));
                if let Some(found) = child.find(&path[end..], captures) {
                    return Some(found);
                }
                captures.truncate(mark);
            }
        }

        if self.catch_all.is_some() {
            captures.push((WILDCARD, path));
        }
        self.catch_all
    }

    fn collect(&self, out: &mut Vec<usize>) {
        out.extend(self.route);
        for child in self.statics.values() {
            child.collect(out);
        }
        for child in self.params.values() {
            child.collect(out);
        }
        out.extend(self.catch_all);
    }
}

/// The default [`PatternStore`].
#[derive(Default)]
pub struct Tree {
    root: Node,
    routes: Vec<Route>,
    by_pattern: HashMap<String, usize>,
}

impl Tree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PatternStore for Tree {
    fn insert(
        &mut self,
        methods: MethodSet,
        pattern: &str,
        handler: BoxHandler,
    ) -> Result<&mut Route, PatternError> {
        let index = match self.by_pattern.get(pattern) {
            Some(index) => *index,
            None => {
                let (tokens, catch_all) = parse(pattern)?;
                let index = self.routes.len();

                let mut node = &mut self.root;
                for token in tokens {
                    node = match token {
                        Token::Static(c) => node.statics.entry(c).or_default(),
                        Token::Param(name) => node.params.entry(name).or_default(),
                    };
                }
                if catch_all {
                    node.catch_all = Some(index);
                } else {
                    node.route = Some(index);
                }

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
        for pattern in patterns {
            parse(pattern)?;
        }
        Ok(())
    }

    fn find(&self, params: &mut Params, path: &str) -> Option<&Endpoints> {
        let mut captures = Vec::new();
        let index = self.root.find(path, &mut captures)?;
        for (key, value) in captures {
            params.set(key, value);
        }
        Some(self.routes[index].endpoints())
    }

    fn has_pattern(&self, pattern: &str) -> bool {
        self.by_pattern.contains_key(pattern)
    }

    fn routes(&self) -> Vec<RouteInfo> {
        let mut order = Vec::with_capacity(self.routes.len());
        self.root.collect(&mut order);
        order.into_iter().map(|i| self.routes[i].info()).collect()
    }

    fn len(&self) -> usize {
        self.routes.len()
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("routes", &self.routes.len())
            .finish()
    }
}
