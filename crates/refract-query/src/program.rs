//! Compilation and evaluation of transform programs.

use crate::{IdSet, QueryError};
use jaq_core::load::{Arena, File, Loader};
use jaq_core::{Compiler, Ctx, Filter, FilterT, Native, RcIter};
use jaq_json::Val;
use std::fmt;

/// The external variable a route's identifier set is bound to.
pub const IDS_VAR: &str = "$ids";

/// An immutable, compiled transform expression.
///
/// Compilation happens once, at route-setup time. Evaluation takes `&self`
/// and holds no interior state, so one program may serve any number of
/// concurrent requests.
pub struct QueryProgram {
    filter: Filter<Native<Val>>,
    source: String,
}

impl QueryProgram {
    /// Compile jq source text with `$ids` declared as the only external
    /// variable.
    ///
    /// Deterministic and side-effect-free. A failure here should be
    /// treated as fatal by route setup; there is no recompilation path at
    /// request time.
    pub fn compile(source: &str) -> Result<Self, QueryError> {
        let arena = Arena::default();
        let loader = Loader::new(jaq_std::defs().chain(jaq_json::defs()));
        let modules = loader
            .load(&arena, File { code: source, path: () })
            .map_err(diagnostics)?;
        let filter = Compiler::default()
            .with_funs(jaq_std::funs().chain(jaq_json::funs()))
            .with_global_vars([IDS_VAR])
            .compile(modules)
            .map_err(diagnostics)?;
        Ok(Self {
            filter,
            source: source.to_owned(),
        })
    }

    /// The source text this program was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluate the program against a JSON document.
    ///
    /// Returns the single emitted value serialized as JSON, or an empty
    /// byte vector when the query emitted nothing. Callers must treat zero
    /// bytes as a valid outcome, not an error.
    pub fn evaluate(&self, input: &[u8], ids: &IdSet) -> Result<Vec<u8>, QueryError> {
        let doc: serde_json::Value =
            serde_json::from_slice(input).map_err(QueryError::Parse)?;
        let inputs = RcIter::new(core::iter::empty());
        let ctx = Ctx::new([Val::from(ids.to_binding())], &inputs);

        let mut captured: Option<Vec<u8>> = None;
        for item in self.filter.run((ctx, Val::from(doc))) {
            // Multiplicity is checked before the item is inspected: a
            // second emission violates the contract even when it is an
            // error.
            if captured.is_some() {
                return Err(QueryError::TooMuchData);
            }
            match item {
                Ok(val) => {
                    let out = serde_json::Value::from(val);
                    let bytes = serde_json::to_vec(&out)
                        .map_err(|e| QueryError::Eval(e.to_string()))?;
                    captured = Some(bytes);
                }
                Err(err) => {
                    let payload = err.into_val();
                    // A null payload is the intentional empty halt:
                    // evaluation stops and the (empty) result stands.
                    if matches!(payload, Val::Null) {
                        break;
                    }
                    return Err(QueryError::Eval(payload.to_string()));
                }
            }
        }
        Ok(captured.unwrap_or_default())
    }
}

impl fmt::Debug for QueryProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryProgram")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Flatten jaq's per-file load/compile diagnostics into one message.
fn diagnostics<F, E: fmt::Debug>(errs: Vec<(F, E)>) -> QueryError {
    let msgs: Vec<String> = errs.into_iter().map(|(_, e)| format!("{e:?}")).collect();
    QueryError::Compile(msgs.join("; "))
}
