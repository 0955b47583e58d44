// Fri Oct 16 2026 - Alex

use crate::context::Context;
use crate::strategy::{Strategy, StrategyError};
use crate::structure::Struct;
use std::fmt;
use std::sync::Arc;

/// Sequential composition of strategies, stops at the first error.
#[derive(Clone, Default)]
pub struct Pipe {
    stages: Vec<Arc<dyn Strategy>>,
}

impl Pipe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stage: Arc<dyn Strategy>) {
        self.stages.push(stage);
    }

    pub fn then(mut self, stage: Arc<dyn Strategy>) -> Self {
        self.push(stage);
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl fmt::Debug for Pipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipe").field("stages", &self.stages.len()).finish()
    }
}

impl Strategy for Pipe {
    fn apply(&self, ctx: &Context, origin: &Struct) -> Result<Struct, StrategyError> {
        let mut current = origin.clone();
        for stage in &self.stages {
            ctx.check()?;
            current = stage.apply(ctx, &current)?;
        }
        ctx.check()?;
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{Pack, Void};
    use crate::structure::Field;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting(Arc<AtomicUsize>);

    impl Strategy for Counting {
        fn apply(&self, ctx: &Context, origin: &Struct) -> Result<Struct, StrategyError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            ctx.check()?;
            Ok(origin.clone())
        }
    }

    struct Failing;

    impl Strategy for Failing {
        fn apply(&self, _ctx: &Context, _origin: &Struct) -> Result<Struct, StrategyError> {
            Err(StrategyError::UnknownStrategy("boom".into()))
        }
    }

    fn sample() -> Struct {
        Struct::new("S").with_fields(vec![
            Field::new("a", "bool", 1, 1),
            Field::new("b", "int64", 8, 8),
        ])
    }

    #[test]
    fn test_applies_in_order() {
        let pipe = Pipe::new().then(Arc::new(Pack)).then(Arc::new(Void));
        let out = pipe.apply(&Context::background(), &sample()).unwrap();
        assert!(out.fields.is_empty());

        let pipe = Pipe::new().then(Arc::new(Void)).then(Arc::new(Pack));
        assert!(pipe.apply(&Context::background(), &sample()).unwrap().fields.is_empty());
    }

    #[test]
    fn test_stops_at_first_error() {
        let count = Arc::new(AtomicUsize::new(0));
        let pipe = Pipe::new()
            .then(Arc::new(Counting(Arc::clone(&count))))
            .then(Arc::new(Failing))
            .then(Arc::new(Counting(Arc::clone(&count))));
        let err = pipe.apply(&Context::background(), &sample()).unwrap_err();
        assert_eq!(err, StrategyError::UnknownStrategy("boom".into()));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancelled_before_first_stage() {
        let count = Arc::new(AtomicUsize::new(0));
        let pipe = Pipe::new().then(Arc::new(Counting(Arc::clone(&count))));
        let ctx = Context::background();
        ctx.cancel();
        assert!(matches!(pipe.apply(&ctx, &sample()), Err(StrategyError::Context(_))));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_debug_lists_stage_count() {
        let pipe = Pipe::new().then(Arc::new(Pack)).then(Arc::new(Void));
        assert_eq!(format!("{:?}", pipe), "Pipe { stages: 2 }");
    }

    #[test]
    fn test_empty_pipe_is_identity() {
        let origin = sample();
        assert_eq!(Pipe::new().apply(&Context::background(), &origin).unwrap(), origin);
    }
}
