#![allow(dead_code)]

use std::fmt::Debug;
use std::sync::Once;

use recordkit_core::{
    CopyArgs, FieldRef, Record, RecordResult, declare, declare_comparable, declare_copy_param,
    declare_copyable, declare_entity_field, declare_record_type,
};

/// Nullable wrapper around a single plain value.
#[derive(Debug, Clone)]
pub struct Optional<T> {
    value: Option<T>,
}

impl<T> Optional<T> {
    pub fn of(value: T) -> Self {
        Self { value: Some(value) }
    }

    pub fn empty() -> Self {
        Self { value: None }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }
}

impl<T> Record for Optional<T>
where
    T: PartialEq + Clone + Debug + 'static,
{
    fn field_names(&self) -> &'static [&'static str] {
        &["value"]
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        (name == "value").then(|| FieldRef::opaque(&self.value))
    }

    fn reconstruct(mut args: CopyArgs) -> RecordResult<Self> {
        Ok(Self {
            value: args.opaque()?,
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
    NonBinary,
}

#[derive(Debug, Clone)]
pub struct Person {
    pub name: String,
    pub age: Optional<u32>,
    pub genders: Vec<Optional<Gender>>,
    /// Never declared: must not affect equality and is not copied.
    pub nickname: Option<String>,
}

impl Person {
    pub fn new(name: &str, age: u32, genders: &[Gender]) -> Self {
        Self {
            name: name.to_string(),
            age: Optional::of(age),
            genders: genders.iter().copied().map(Optional::of).collect(),
            nickname: None,
        }
    }
}

impl Record for Person {
    fn field_names(&self) -> &'static [&'static str] {
        &["name", "age", "genders", "nickname"]
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "name" => Some(FieldRef::opaque(&self.name)),
            "age" => Some(FieldRef::record(&self.age)),
            "genders" => Some(FieldRef::records(&self.genders)),
            "nickname" => Some(FieldRef::opaque(&self.nickname)),
            _ => None,
        }
    }

    fn reconstruct(mut args: CopyArgs) -> RecordResult<Self> {
        Ok(Self {
            name: args.opaque()?,
            age: args.record()?,
            genders: args.records()?,
            nickname: None,
        })
    }
}

/// Never declared; nested inside [`Member`] and copied with `Clone`.
#[derive(Debug, Clone)]
pub struct Badge {
    pub label: String,
    pub level: u8,
}

impl Record for Badge {
    fn field_names(&self) -> &'static [&'static str] {
        &["label", "level"]
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "label" => Some(FieldRef::opaque(&self.label)),
            "level" => Some(FieldRef::opaque(&self.level)),
            _ => None,
        }
    }

    fn reconstruct(mut args: CopyArgs) -> RecordResult<Self> {
        Ok(Self {
            label: args.opaque()?,
            level: args.opaque()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Member {
    pub handle: String,
    pub badge: Badge,
    pub badges: Vec<Badge>,
}

impl Record for Member {
    fn field_names(&self) -> &'static [&'static str] {
        &["handle", "badge", "badges"]
    }

    fn field(&self, name: &str) -> Option<FieldRef<'_>> {
        match name {
            "handle" => Some(FieldRef::opaque(&self.handle)),
            "badge" => Some(FieldRef::record(&self.badge)),
            "badges" => Some(FieldRef::records(&self.badges)),
            _ => None,
        }
    }

    fn reconstruct(mut args: CopyArgs) -> RecordResult<Self> {
        Ok(Self {
            handle: args.opaque()?,
            badge: args.record()?,
            badges: args.records()?,
        })
    }
}

/// Register the fixture types in the global store exactly once.
pub fn declare_fixtures() {
    static DECLARED: Once = Once::new();

    DECLARED.call_once(|| {
        recordkit_observability::init();

        declare::<Optional<u32>>()
            .entity_field("value")
            .copy_param("value", 0)
            .finish();
        declare::<Optional<Gender>>()
            .entity_field("value")
            .copy_param("value", 0)
            .finish();

        // Out of position order on purpose; copy sorts by position.
        declare_copy_param::<Person>("genders", 2);
        declare_copy_param::<Person>("name", 0);
        declare_copy_param::<Person>("age", 1);
        declare_entity_field::<Person>("name");
        declare_entity_field::<Person>("age");
        declare_entity_field::<Person>("genders");
        declare_record_type::<Person>();

        for field in ["handle", "badge", "badges"] {
            declare_comparable::<Member>(field);
            declare_copyable::<Member>(field);
        }
        declare_copy_param::<Member>("handle", 0);
        declare_copy_param::<Member>("badge", 1);
        declare_copy_param::<Member>("badges", 2);
        declare_record_type::<Member>();
    });
}
