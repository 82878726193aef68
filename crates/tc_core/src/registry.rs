//! Entity registry
//!
//! Owns entity identity and static attributes. Frames refer to entities by
//! id only, so nothing here touches positions; the session applies the frame
//! side effects of adding an entity.

use crate::geometry::{Pitch, Position};
use crate::model::{Entity, EntityId, Team};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
}

impl EntityRegistry {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Registry order; first match wins in possession capture.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Appends a placeholder entity under a fresh id and returns the id.
    pub fn add(&mut self, team: Team) -> EntityId {
        let id = loop {
            let suffix = Uuid::new_v4().simple().to_string();
            let candidate = format!("{team}-{}", &suffix[..8]);
            if !self.contains(&candidate) {
                break candidate;
            }
        };
        self.entities.push(Entity::placeholder(id.clone(), team));
        debug!("Added entity {} to team {}", id, team);
        id
    }

    pub fn remove(&mut self, id: &str) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(index))
    }

    pub fn relabel(&mut self, id: &str, label: impl Into<String>) -> bool {
        match self.entities.iter_mut().find(|e| e.id == id) {
            Some(entity) => {
                entity.label = label.into();
                true
            }
            None => false,
        }
    }

    pub fn replace_all(&mut self, entities: Vec<Entity>) {
        self.entities = entities;
    }
}

/// Where a newly added entity appears: a column near the team's own goal line.
pub fn spawn_position(team: Team, pitch: &Pitch, inset: f64) -> Position {
    let x = match team {
        Team::A => inset,
        Team::B => pitch.length - inset,
    };
    pitch.clamp(Position::new(x, pitch.width * 0.5))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_generates_unique_placeholder() {
        let mut registry = EntityRegistry::default();
        let a = registry.add(Team::A);
        let b = registry.add(Team::A);
        assert_ne!(a, b);
        assert!(a.starts_with("A-"));
        assert_eq!(registry.len(), 2);

        let entity = registry.get(&a).unwrap();
        assert_eq!(entity.label, "?");
        assert_eq!(entity.role, "SUB");
        assert_eq!(entity.team, Team::A);
    }

    #[test]
    fn test_add_preserves_order() {
        let mut registry = EntityRegistry::new(vec![Entity::new("A-0", Team::A, "1", "GK")]);
        let added = registry.add(Team::B);
        let ids: Vec<&str> = registry.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["A-0", added.as_str()]);
    }

    #[test]
    fn test_remove_and_relabel() {
        let mut registry = EntityRegistry::new(vec![
            Entity::new("A-0", Team::A, "1", "GK"),
            Entity::new("A-1", Team::A, "2", "LB"),
        ]);
        assert!(registry.relabel("A-1", "22"));
        assert_eq!(registry.get("A-1").unwrap().label, "22");
        assert!(!registry.relabel("X-1", "9"));

        let removed = registry.remove("A-0").unwrap();
        assert_eq!(removed.id, "A-0");
        assert!(registry.remove("A-0").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_spawn_columns() {
        let pitch = Pitch::default();
        assert_eq!(spawn_position(Team::A, &pitch, 2.0), Position::new(2.0, 34.0));
        assert_eq!(spawn_position(Team::B, &pitch, 2.0), Position::new(103.0, 34.0));
    }
}
