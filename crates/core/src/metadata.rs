//! Per-type metadata registry.
//!
//! Entries are keyed by `TypeId` and only ever grow: flags are set, copy
//! parameters are appended, synthesized operations are installed. Reads copy
//! the per-type collections out so no lock is held while the synthesized
//! operations recurse into nested records.

use core::any::{Any, TypeId};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::synth::SynthesizedOps;

/// Boolean facet a field can carry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFacet {
    /// Participates in structural equality.
    Comparable,
    /// Participates in copy reconstruction.
    Copyable,
}

/// Binding of a field to a reconstruction argument position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CopyParam {
    pub field: String,
    pub position: usize,
}

impl CopyParam {
    pub fn new(field: impl Into<String>, position: usize) -> Self {
        Self {
            field: field.into(),
            position,
        }
    }
}

/// Snapshot of everything registered for one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMetadata {
    pub type_name: String,
    pub comparable: Vec<String>,
    pub copyable: Vec<String>,
    /// Declaration order, not sorted by position.
    pub copy_params: Vec<CopyParam>,
    pub synthesized: bool,
}

#[derive(Debug, Default)]
struct TypeEntry {
    type_name: &'static str,
    comparable: HashSet<String>,
    copyable: HashSet<String>,
    copy_params: Vec<CopyParam>,
    ops: Option<SynthesizedOps>,
}

impl TypeEntry {
    fn facet(&self, facet: FieldFacet) -> &HashSet<String> {
        match facet {
            FieldFacet::Comparable => &self.comparable,
            FieldFacet::Copyable => &self.copyable,
        }
    }

    fn facet_mut(&mut self, facet: FieldFacet) -> &mut HashSet<String> {
        match facet {
            FieldFacet::Comparable => &mut self.comparable,
            FieldFacet::Copyable => &mut self.copyable,
        }
    }
}

/// Registry of field and copy-parameter annotations, keyed by record type.
///
/// Most code uses [`MetadataStore::global`]; tests and embedders can create
/// their own isolated store with [`MetadataStore::new`].
#[derive(Debug, Default)]
pub struct MetadataStore {
    types: RwLock<HashMap<TypeId, TypeEntry>>,
}

static GLOBAL: OnceLock<MetadataStore> = OnceLock::new();

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide store used by the `declare_*` functions and `RecordExt`.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::new)
    }

    // Poisoning is recovered: entries are only ever added to.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<TypeId, TypeEntry>> {
        self.types.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<TypeId, TypeEntry>> {
        self.types.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_entry<T: 'static>(&self, f: impl FnOnce(&mut TypeEntry)) {
        let mut types = self.write();
        let entry = types.entry(TypeId::of::<T>()).or_default();
        entry.type_name = core::any::type_name::<T>();
        f(entry);
    }

    /// Record that `field` on `T` carries `facet`. Idempotent.
    pub fn set_flag<T: Record>(&self, field: impl Into<String>, facet: FieldFacet) {
        let field = field.into();
        tracing::trace!(
            record = core::any::type_name::<T>(),
            field = %field,
            ?facet,
            "field flagged"
        );
        self.with_entry::<T>(|entry| {
            entry.facet_mut(facet).insert(field);
        });
    }

    /// Whether `field` on `T` carries `facet`; `false` when never registered.
    pub fn flag<T: 'static>(&self, field: &str, facet: FieldFacet) -> bool {
        self.flag_of(TypeId::of::<T>(), field, facet)
    }

    pub fn flag_of(&self, type_id: TypeId, field: &str, facet: FieldFacet) -> bool {
        self.read()
            .get(&type_id)
            .is_some_and(|entry| entry.facet(facet).contains(field))
    }

    /// Copy of all fields carrying `facet` for `type_id`.
    pub fn fields_with(&self, type_id: TypeId, facet: FieldFacet) -> HashSet<String> {
        self.read()
            .get(&type_id)
            .map(|entry| entry.facet(facet).clone())
            .unwrap_or_default()
    }

    pub fn append_copy_param<T: Record>(&self, param: CopyParam) {
        tracing::debug!(
            record = core::any::type_name::<T>(),
            field = %param.field,
            position = param.position,
            "copy param registered"
        );
        self.with_entry::<T>(|entry| entry.copy_params.push(param));
    }

    /// Copy params for `T` in declaration order; empty when none registered.
    pub fn copy_params<T: 'static>(&self) -> Vec<CopyParam> {
        self.copy_params_of(TypeId::of::<T>())
    }

    pub fn copy_params_of(&self, type_id: TypeId) -> Vec<CopyParam> {
        self.read()
            .get(&type_id)
            .map(|entry| entry.copy_params.clone())
            .unwrap_or_default()
    }

    /// Mark `T` as synthesized and install its operations.
    ///
    /// Re-marking replaces the installed operations and leaves metadata intact.
    pub fn mark_record_type<T: Record>(&self) {
        self.with_entry::<T>(|entry| {
            if entry.ops.is_some() {
                tracing::warn!(
                    record = entry.type_name,
                    "record type synthesized more than once"
                );
            }
            entry.ops = Some(SynthesizedOps::of::<T>());
        });
        tracing::debug!(
            record = core::any::type_name::<T>(),
            "record type synthesized"
        );
    }

    /// Whether `value`'s concrete type has been synthesized.
    pub fn is_record_type(&self, value: &dyn Any) -> bool {
        self.is_record_type_id(value.type_id())
    }

    pub fn is_record_type_id(&self, type_id: TypeId) -> bool {
        self.ops_of(type_id).is_some()
    }

    pub(crate) fn ops_of(&self, type_id: TypeId) -> Option<SynthesizedOps> {
        self.read().get(&type_id).and_then(|entry| entry.ops)
    }

    /// Snapshot of the metadata registered for `T`.
    pub fn describe<T: 'static>(&self) -> TypeMetadata {
        let types = self.read();
        let sorted = |set: &HashSet<String>| {
            set.iter()
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect::<Vec<_>>()
        };

        match types.get(&TypeId::of::<T>()) {
            Some(entry) => TypeMetadata {
                type_name: entry.type_name.to_string(),
                comparable: sorted(&entry.comparable),
                copyable: sorted(&entry.copyable),
                copy_params: entry.copy_params.clone(),
                synthesized: entry.ops.is_some(),
            },
            None => TypeMetadata {
                type_name: core::any::type_name::<T>().to_string(),
                comparable: Vec::new(),
                copyable: Vec::new(),
                copy_params: Vec::new(),
                synthesized: false,
            },
        }
    }
}
