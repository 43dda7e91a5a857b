//! Thread-shareable handle over a [`Connectivity`].
//!
//! Readers of clean relations proceed concurrently under the read lock. The first
//! reader to hit a dirty relation takes the write lock, computes, and downgrades to
//! a read guard without letting another writer in between.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockWriteGuard};

use crate::mesh_error::MeshConnectivityError;
use crate::topology::Index;
use crate::topology::connectivity::Connectivity;
use crate::topology::incidence::Incidence;
use crate::topology::index_set::IndexSet;
use crate::topology::polytope::PolytopeType;

#[derive(Clone, Debug, Default)]
pub struct SharedConnectivity {
    inner: Arc<RwLock<Connectivity>>,
}

impl SharedConnectivity {
    pub fn new(conn: Connectivity) -> Self {
        Self {
            inner: Arc::new(RwLock::new(conn)),
        }
    }

    /// Run `f` under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&Connectivity) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` under the write lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut Connectivity) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Run `f` on relation `(d, d')`, computing it first if it is dirty.
    pub fn with_relation<R>(
        &self,
        d: usize,
        dp: usize,
        f: impl FnOnce(&Incidence) -> R,
    ) -> Result<R, MeshConnectivityError> {
        {
            let guard = self.inner.read();
            match guard.try_incidence(d, dp) {
                Ok(rel) => return Ok(f(rel)),
                Err(MeshConnectivityError::StaleIncidence { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        let mut guard = self.inner.write();
        guard.compute(d, dp)?;
        let guard = RwLockWriteGuard::downgrade(guard);
        guard.try_incidence(d, dp).map(f)
    }

    /// Owned copy of the entities of dimension `d'` incident to entity `i`.
    pub fn incident_set(
        &self,
        d: usize,
        dp: usize,
        i: Index,
    ) -> Result<IndexSet, MeshConnectivityError> {
        self.with_relation(d, dp, |rel| {
            rel.get(i)
                .cloned()
                .ok_or(MeshConnectivityError::IndexOutOfRange {
                    dimension: d,
                    index: i,
                    count: rel.len(),
                })
        })?
    }

    pub fn count(&self, d: usize) -> Result<usize, MeshConnectivityError> {
        self.inner.read().count(d)
    }

    pub fn declare_cell(
        &self,
        geometry: PolytopeType,
        vertices: &[Index],
    ) -> Result<Index, MeshConnectivityError> {
        self.inner.write().declare_cell(geometry, vertices)
    }

    pub fn clear(&self, d: usize, dp: usize) -> Result<(), MeshConnectivityError> {
        self.inner.write().clear(d, dp).map(|_| ())
    }

    /// Recover the engine if this is the last handle.
    pub fn try_into_inner(self) -> Result<Connectivity, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl From<Connectivity> for SharedConnectivity {
    fn from(conn: Connectivity) -> Self {
        Self::new(conn)
    }
}
