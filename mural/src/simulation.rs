//! The surface of the game simulation the front-end draws.
//!
//! Entities are owned by the simulation; the front-end only keeps weak references to
//! characters and receives their events through a channel.

use std::fmt;
use std::sync::Arc;

use crossbeam_channel::Sender;
use mural_core::types::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Weapon,
    Armor,
    Shield,
    Ring,
    Misc,
}

/// `id#serial`, the key entities and their wrappers are matched by.
pub fn entity_key(id: &str, serial: &str) -> String {
    format!("{}#{}", id, serial)
}

pub trait Item: Send + Sync {
    fn id(&self) -> &str;
    fn serial(&self) -> &str;
    fn kind(&self) -> ItemKind;

    fn key(&self) -> String {
        entity_key(self.id(), self.serial())
    }
}

pub trait Effect: Send + Sync {
    fn id(&self) -> &str;
    fn serial(&self) -> &str;

    fn key(&self) -> String {
        entity_key(self.id(), self.serial())
    }
}

pub trait Skill: Send + Sync {
    fn id(&self) -> &str;
    fn serial(&self) -> &str;

    fn key(&self) -> String {
        entity_key(self.id(), self.serial())
    }
}

/// Events a character publishes to the wrappers subscribed to it.
#[derive(Clone)]
pub enum CharacterEvent {
    SkillActivated(Arc<dyn Skill>),
    ChatSent(String),
}

impl fmt::Debug for CharacterEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterEvent::SkillActivated(skill) => f.debug_tuple("SkillActivated").field(&skill.key()).finish(),
            CharacterEvent::ChatSent(text) => f.debug_tuple("ChatSent").field(text).finish(),
        }
    }
}

pub trait Character: Send + Sync {
    fn id(&self) -> &str;
    fn serial(&self) -> &str;
    fn race(&self) -> &str;
    fn gender(&self) -> Gender;

    fn position(&self) -> Position;
    fn destination(&self) -> Position;
    fn is_moving(&self) -> bool;
    fn is_casting(&self) -> bool;
    fn is_crafting(&self) -> bool;

    fn inventory(&self) -> Vec<Arc<dyn Item>>;
    fn equipped(&self) -> Vec<Arc<dyn Item>>;
    fn effects(&self) -> Vec<Arc<dyn Effect>>;
    fn skills(&self) -> Vec<Arc<dyn Skill>>;

    /// Registers a receiver of this character's events.
    fn subscribe(&self, events: Sender<CharacterEvent>);

    fn key(&self) -> String {
        entity_key(self.id(), self.serial())
    }
}

pub trait AreaObject: Send + Sync {
    fn id(&self) -> &str;
    fn serial(&self) -> &str;
    fn position(&self) -> Position;

    fn key(&self) -> String {
        entity_key(self.id(), self.serial())
    }
}

#[cfg(any(test, feature = "testing"))]
#[doc(hidden)]
pub mod testing {
    //! An in-memory simulation for wrapper and session tests.

    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone)]
    pub struct TestItem {
        pub id: String,
        pub serial: String,
        pub kind: ItemKind,
    }

    impl TestItem {
        pub fn new(id: &str, serial: &str, kind: ItemKind) -> Arc<Self> {
            Arc::new(Self {
                id: id.into(),
                serial: serial.into(),
                kind,
            })
        }
    }

    impl Item for TestItem {
        fn id(&self) -> &str {
            &self.id
        }

        fn serial(&self) -> &str {
            &self.serial
        }

        fn kind(&self) -> ItemKind {
            self.kind
        }
    }

    #[derive(Debug, Clone)]
    pub struct TestEntity {
        pub id: String,
        pub serial: String,
    }

    impl TestEntity {
        pub fn new(id: &str, serial: &str) -> Arc<Self> {
            Arc::new(Self {
                id: id.into(),
                serial: serial.into(),
            })
        }
    }

    impl Effect for TestEntity {
        fn id(&self) -> &str {
            &self.id
        }

        fn serial(&self) -> &str {
            &self.serial
        }
    }

    impl Skill for TestEntity {
        fn id(&self) -> &str {
            &self.id
        }

        fn serial(&self) -> &str {
            &self.serial
        }
    }

    #[derive(Default)]
    pub struct TestState {
        pub position: Position,
        pub destination: Position,
        pub moving: bool,
        pub casting: bool,
        pub crafting: bool,
        pub inventory: Vec<Arc<dyn Item>>,
        pub equipped: Vec<Arc<dyn Item>>,
        pub effects: Vec<Arc<dyn Effect>>,
        pub skills: Vec<Arc<dyn Skill>>,
    }

    pub struct TestCharacter {
        pub id: String,
        pub serial: String,
        pub race: String,
        pub gender: Gender,
        pub state: Mutex<TestState>,
        pub subscribers: Mutex<Vec<Sender<CharacterEvent>>>,
    }

    impl TestCharacter {
        pub fn new(id: &str, serial: &str, race: &str, gender: Gender) -> Arc<Self> {
            Arc::new(Self {
                id: id.into(),
                serial: serial.into(),
                race: race.into(),
                gender,
                state: Mutex::new(TestState::default()),
                subscribers: Mutex::new(Vec::new()),
            })
        }

        pub fn state(&self) -> std::sync::MutexGuard<'_, TestState> {
            self.state.lock().unwrap()
        }

        pub fn emit(&self, event: CharacterEvent) {
            for subscriber in self.subscribers.lock().unwrap().iter() {
                let _ = subscriber.send(event.clone());
            }
        }
    }

    impl Character for TestCharacter {
        fn id(&self) -> &str {
            &self.id
        }

        fn serial(&self) -> &str {
            &self.serial
        }

        fn race(&self) -> &str {
            &self.race
        }

        fn gender(&self) -> Gender {
            self.gender
        }

        fn position(&self) -> Position {
            self.state().position
        }

        fn destination(&self) -> Position {
            self.state().destination
        }

        fn is_moving(&self) -> bool {
            self.state().moving
        }

        fn is_casting(&self) -> bool {
            self.state().casting
        }

        fn is_crafting(&self) -> bool {
            self.state().crafting
        }

        fn inventory(&self) -> Vec<Arc<dyn Item>> {
            self.state().inventory.clone()
        }

        fn equipped(&self) -> Vec<Arc<dyn Item>> {
            self.state().equipped.clone()
        }

        fn effects(&self) -> Vec<Arc<dyn Effect>> {
            self.state().effects.clone()
        }

        fn skills(&self) -> Vec<Arc<dyn Skill>> {
            self.state().skills.clone()
        }

        fn subscribe(&self, events: Sender<CharacterEvent>) {
            self.subscribers.lock().unwrap().push(events);
        }
    }
}
