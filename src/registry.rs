use crate::scene::SceneDef;

/// Explicit, ordered registry of scene definitions.
///
/// Scene programs are listed here instead of being discovered by
/// scanning a module's exports; "validate everything" iterates in
/// registration order and "validate one by name" is a lookup.
#[derive(Default)]
pub struct SceneRegistry {
    scenes: Vec<Box<dyn SceneDef>>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, def: impl SceneDef + 'static) {
        self.scenes.push(Box::new(def));
    }

    pub fn get(&self, name: &str) -> Option<&dyn SceneDef> {
        self.scenes
            .iter()
            .find(|def| def.name() == name)
            .map(|def| def.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn SceneDef> {
        self.scenes.iter().map(|def| def.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.scenes.iter().map(|def| def.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::StagelintResult, scene::Scene};

    struct Named(&'static str);

    impl SceneDef for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn construct(&self, _scene: &mut Scene) -> StagelintResult<()> {
            Ok(())
        }
    }

    #[test]
    fn lookup_by_name() {
        let mut reg = SceneRegistry::new();
        reg.register(Named("One"));
        reg.register(Named("Two"));
        assert!(reg.get("Two").is_some());
        assert!(reg.get("Three").is_none());
    }

    #[test]
    fn iteration_preserves_registration_order() {
        let mut reg = SceneRegistry::new();
        reg.register(Named("B"));
        reg.register(Named("A"));
        assert_eq!(reg.names(), vec!["B", "A"]);
    }
}
