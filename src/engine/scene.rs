// Scene: display list, object factories and the animation library

use super::assets::{AnimationLibrary, AssetError, AtlasRegion};
use super::renderer::Sprite;
use super::tiled::TiledObject;
use anyhow::Context;
use glam::Vec2;
use log::{debug, info};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

/// Index of an object in a scene's display list
pub type ObjectId = usize;

/// Anything living in a scene's display list
pub trait GameObject: fmt::Debug {
    /// Registry key the object was created from
    fn kind(&self) -> &str;

    /// Advance per-frame state (animations)
    fn update(&mut self, _dt: f32) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Builds a game object from a spawn point
pub type GameObjectFactory = fn(&Scene, &TiledObject) -> anyhow::Result<Box<dyn GameObject>>;

/// Scene errors
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("Game object factory already registered: {0}")]
    AlreadyRegistered(String),

    #[error("No game object factory registered for '{0}'")]
    UnknownFactory(String),
}

/// Named game object factories
#[derive(Default)]
pub struct GameObjectRegistry {
    factories: BTreeMap<String, GameObjectFactory>,
}

impl GameObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under a key; keys are registered once
    pub fn register(&mut self, key: &str, factory: GameObjectFactory) -> Result<(), SceneError> {
        if self.contains(key) {
            return Err(SceneError::AlreadyRegistered(key.to_string()));
        }
        debug!("Registered game object factory '{}'", key);
        self.factories.insert(key.to_string(), factory);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<GameObjectFactory> {
        self.factories.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

impl fmt::Debug for GameObjectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}

/// A scene owning its objects
#[derive(Debug)]
pub struct Scene {
    key: String,
    library: AnimationLibrary,
    registry: GameObjectRegistry,
    objects: Vec<Box<dyn GameObject>>,
}

impl Scene {
    pub fn new(key: &str, library: AnimationLibrary) -> Self {
        Self {
            key: key.to_string(),
            library,
            registry: GameObjectRegistry::new(),
            objects: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn library(&self) -> &AnimationLibrary {
        &self.library
    }

    pub fn registry_mut(&mut self) -> &mut GameObjectRegistry {
        &mut self.registry
    }

    /// Create a sprite of a loaded sheet with all of its clips
    pub fn add_sprite(&self, x: f32, y: f32, texture: &str) -> Result<Sprite, AssetError> {
        let clips = self.library.clips(texture)?;
        Ok(Sprite::new(texture, x, y, clips))
    }

    /// Origin declared by the first frame of a sheet
    pub fn frame_origin(&self, texture: &str) -> Result<Vec2, AssetError> {
        self.library.frame_origin(texture)
    }

    /// Atlas frame a sprite shows, `None` before it plays anything
    pub fn current_frame(&self, sprite: &Sprite) -> Result<Option<&AtlasRegion>, AssetError> {
        sprite
            .current_frame()
            .map(|(clip, index)| self.library.frame(&sprite.texture, clip, index))
            .transpose()
    }

    /// Put an object on the display list
    pub fn add_existing(&mut self, object: Box<dyn GameObject>) -> ObjectId {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Build an object with a registered factory and add it to the scene
    pub fn spawn(&mut self, key: &str, spawn: &TiledObject) -> anyhow::Result<ObjectId> {
        let factory = self
            .registry
            .get(key)
            .ok_or_else(|| SceneError::UnknownFactory(key.to_string()))?;
        let object = factory(&*self, spawn)
            .with_context(|| format!("Failed to spawn '{}' from object {}", key, spawn.id))?;
        let kind = object.kind().to_string();
        let id = self.add_existing(object);
        info!("Spawned {} as object {} in scene '{}'", kind, id, self.key);
        Ok(id)
    }

    /// Get an object by id, if it has type `T`
    pub fn get<T: GameObject + 'static>(&self, id: ObjectId) -> Option<&T> {
        self.objects.get(id)?.as_any().downcast_ref()
    }

    pub fn get_mut<T: GameObject + 'static>(&mut self, id: ObjectId) -> Option<&mut T> {
        self.objects.get_mut(id)?.as_any_mut().downcast_mut()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Advance every object by one update
    pub fn update(&mut self, dt: f32) {
        for object in &mut self.objects {
            object.update(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::AssetManifest;
    use serde_json::json;

    #[derive(Debug)]
    struct Marker {
        sprite: Sprite,
    }

    impl GameObject for Marker {
        fn kind(&self) -> &str {
            "marker"
        }

        fn update(&mut self, dt: f32) {
            self.sprite.update(dt);
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn create_marker(scene: &Scene, spawn: &TiledObject) -> anyhow::Result<Box<dyn GameObject>> {
        let mut sprite = scene.add_sprite(spawn.x, spawn.y, "lantern")?;
        sprite.play("lantern_walk");
        Ok(Box::new(Marker { sprite }))
    }

    fn create_broken(scene: &Scene, spawn: &TiledObject) -> anyhow::Result<Box<dyn GameObject>> {
        let sprite = scene.add_sprite(spawn.x, spawn.y, "ghost")?;
        Ok(Box::new(Marker { sprite }))
    }

    fn scene() -> Scene {
        let library = AnimationLibrary::from_manifest(&AssetManifest::builtin()).unwrap();
        Scene::new("test", library)
    }

    fn spawn_point() -> TiledObject {
        crate::engine::tiled::parse_tiled_object(&json!({ "id": 1, "x": 5, "y": 6 })).unwrap()
    }

    #[test]
    fn test_register_once() {
        let mut registry = GameObjectRegistry::new();
        registry.register("marker", create_marker).unwrap();
        assert!(registry.contains("marker"));
        assert!(matches!(
            registry.register("marker", create_marker),
            Err(SceneError::AlreadyRegistered(_))
        ));
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["marker"]);
    }

    #[test]
    fn test_spawn_and_update() {
        let mut scene = scene();
        scene.registry_mut().register("marker", create_marker).unwrap();

        let id = scene.spawn("marker", &spawn_point()).unwrap();
        assert_eq!(scene.object_count(), 1);

        scene.update(0.1);
        let marker = scene.get::<Marker>(id).unwrap();
        assert_eq!(marker.kind(), "marker");
        assert_eq!(marker.sprite.transform().position, Vec2::new(5.0, 6.0));

        let frame = scene.current_frame(&marker.sprite).unwrap().unwrap();
        assert_eq!(frame.name, "lantern_walk_1");
        assert_eq!(frame.size(), Vec2::new(16.0, 16.0));
    }

    #[test]
    fn test_current_frame_before_play() {
        let scene = scene();
        let sprite = scene.add_sprite(0.0, 0.0, "player").unwrap();
        assert!(scene.current_frame(&sprite).unwrap().is_none());
    }

    #[test]
    fn test_spawn_unknown_key() {
        let mut scene = scene();
        let err = scene.spawn("marker", &spawn_point()).unwrap_err();
        assert!(err.downcast_ref::<SceneError>().is_some());
        assert_eq!(scene.object_count(), 0);
    }

    #[test]
    fn test_failed_factory_adds_nothing() {
        let mut scene = scene();
        scene.registry_mut().register("broken", create_broken).unwrap();
        let err = scene.spawn("broken", &spawn_point()).unwrap_err();
        assert!(err.root_cause().to_string().contains("ghost"));
        assert_eq!(scene.object_count(), 0);
    }

    #[test]
    fn test_add_sprite_unknown_texture() {
        assert!(matches!(
            scene().add_sprite(0.0, 0.0, "ghost"),
            Err(AssetError::NotFound(_))
        ));
    }
}
