// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Resolved timezone transition tables.
//!
//! A table is a list of `(boundary, index)` pairs sorted by boundary. The index
//! selects, in the descriptor table, the timezone in effect *before* the boundary
//! (that is, from the previous boundary up to this one). `None` descriptors mark
//! naive local time.

use crate::error::ConfigurationError;

#[derive(Debug, Clone)]
pub struct TransitionTable<Z> {
    descriptors: Vec<Option<Z>>,
    boundaries: Vec<i64>,
    indexes: Vec<usize>,
    default_index: usize,
}

impl<Z> TransitionTable<Z> {
    /// Validates the tables. Nothing is consumed on error other than the
    /// arguments themselves.
    pub fn new(
        descriptors: Vec<Option<Z>>,
        boundaries: Vec<i64>,
        indexes: Vec<usize>,
        default_index: usize,
    ) -> Result<Self, ConfigurationError> {
        if boundaries.len() != indexes.len() {
            return Err(ConfigurationError::LengthMismatch {
                boundaries: boundaries.len(),
                indexes: indexes.len(),
            });
        }

        let descriptor_count = descriptors.len();
        if let Some(&index) = std::iter::once(&default_index)
            .chain(indexes.iter())
            .find(|&&index| index >= descriptor_count)
        {
            return Err(ConfigurationError::IndexOutOfRange {
                index,
                descriptors: descriptor_count,
            });
        }

        if let Some(position) = boundaries.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(ConfigurationError::Unsorted {
                position: position + 1,
            });
        }

        Ok(Self {
            descriptors,
            boundaries,
            indexes,
            default_index,
        })
    }

    /// A table without transitions: `descriptor` applies at every instant.
    pub fn fixed(descriptor: Option<Z>) -> Self {
        Self {
            descriptors: vec![descriptor],
            boundaries: Vec::new(),
            indexes: Vec::new(),
            default_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    pub fn boundaries(&self) -> &[i64] {
        &self.boundaries
    }

    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }

    pub fn descriptors(&self) -> &[Option<Z>] {
        &self.descriptors
    }

    pub fn default_index(&self) -> usize {
        self.default_index
    }

    /// Descriptor in effect before the boundary at `position`.
    #[inline]
    pub(crate) fn descriptor_before(&self, position: usize) -> &Option<Z> {
        &self.descriptors[self.indexes[position]]
    }

    pub(crate) fn default_descriptor(&self) -> &Option<Z> {
        &self.descriptors[self.default_index]
    }
}
