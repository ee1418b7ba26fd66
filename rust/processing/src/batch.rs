// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reading documents and writing artifact pairs
//!
//! Each document is converted fully in memory first. Both artifacts are then
//! written to temporary files and renamed into place, so a failed document
//! never leaves a lone `.obj` or `.mtl` behind.

use crate::converter::{ConversionStats, ConvertedLevel, Converter};
use crate::error::{Error, Result};
use levelobj_core::LevelDocument;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

/// Level names converted when no inputs are given
pub const DEFAULT_LEVELS: [&str; 5] = ["burg", "littletown", "sandstorm", "subzero", "kanji"];

/// Batch driver settings
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub output_dir: PathBuf,
    /// Convert documents concurrently
    pub parallel: bool,
    /// Continue after a failed document (sequential mode only; parallel mode
    /// always attempts every document)
    pub keep_going: bool,
}

/// Paths of one written artifact pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub obj: PathBuf,
    pub mtl: PathBuf,
}

/// Outcome of one input document
#[derive(Debug)]
pub struct DocumentOutcome {
    pub input: PathBuf,
    pub result: Result<(Artifacts, ConversionStats)>,
}

/// Outcome of a batch, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.input.as_path(), e)))
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

/// Default input list: `<input_dir>/<level>.json` for each [`DEFAULT_LEVELS`] entry
pub fn default_inputs(input_dir: &Path) -> Vec<PathBuf> {
    DEFAULT_LEVELS
        .iter()
        .map(|name| input_dir.join(format!("{name}.json")))
        .collect()
}

/// Read and convert one document without writing anything
pub fn convert_file(converter: &Converter<'_>, input: &Path) -> Result<ConvertedLevel> {
    let bytes = fs::read(input).map_err(|source| Error::ReadInput {
        path: input.to_path_buf(),
        source,
    })?;
    let document = LevelDocument::from_slice(&bytes)?;
    converter.convert(&document)
}

/// Write both artifacts of a converted level into `dir`
pub fn write_artifacts(level: &ConvertedLevel, dir: &Path) -> Result<Artifacts> {
    fs::create_dir_all(dir).map_err(|source| Error::WriteOutput {
        path: dir.to_path_buf(),
        source,
    })?;

    let artifacts = Artifacts {
        obj: dir.join(level.obj_file_name()),
        mtl: dir.join(level.mtl_file_name()),
    };
    let obj_tmp = temp_path(&artifacts.obj);
    let mtl_tmp = temp_path(&artifacts.mtl);

    let staged = write_file(&obj_tmp, &level.obj).and_then(|()| write_file(&mtl_tmp, &level.mtl));
    if let Err(err) = staged {
        let _ = fs::remove_file(&obj_tmp);
        let _ = fs::remove_file(&mtl_tmp);
        return Err(err);
    }

    rename(&obj_tmp, &artifacts.obj)?;
    if let Err(err) = rename(&mtl_tmp, &artifacts.mtl) {
        let _ = fs::remove_file(&artifacts.obj);
        let _ = fs::remove_file(&mtl_tmp);
        return Err(err);
    }

    tracing::info!(
        obj = %artifacts.obj.display(),
        mtl = %artifacts.mtl.display(),
        vertices = level.stats.vertices,
        faces = level.stats.faces,
        "Wrote level artifacts"
    );
    Ok(artifacts)
}

/// Convert one document and write its artifacts
pub fn convert_and_write(
    converter: &Converter<'_>,
    input: &Path,
    output_dir: &Path,
) -> Result<(Artifacts, ConversionStats)> {
    let level = convert_file(converter, input)?;
    let artifacts = write_artifacts(&level, output_dir)?;
    Ok((artifacts, level.stats))
}

/// Output names already taken in one batch, mapped to the input that took them
#[derive(Debug, Default)]
struct NameClaims {
    claimed: FxHashMap<String, PathBuf>,
}

impl NameClaims {
    /// Reserve the artifact stem of `level`. A second document with the same
    /// stem fails instead of overwriting the first pair.
    fn claim(&mut self, level: ConvertedLevel, input: &Path) -> Result<ConvertedLevel> {
        match self.claimed.entry(level.name.clone()) {
            Entry::Occupied(first) => Err(Error::DuplicateName {
                name: level.name,
                first: first.get().clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(input.to_path_buf());
                Ok(level)
            }
        }
    }
}

/// Convert a list of documents and write one artifact pair per document
///
/// Output names are claimed in input order, so when two documents share a
/// name the later one fails with [`Error::DuplicateName`] in both modes.
pub fn convert_batch(
    converter: &Converter<'_>,
    inputs: &[PathBuf],
    options: &BatchOptions,
) -> BatchReport {
    let mut claims = NameClaims::default();

    let outcomes: Vec<DocumentOutcome> = if options.parallel {
        let converted: Vec<Result<ConvertedLevel>> = inputs
            .par_iter()
            .map(|input| convert_file(converter, input))
            .collect();
        let claimed: Vec<Result<ConvertedLevel>> = converted
            .into_iter()
            .zip(inputs)
            .map(|(level, input)| level.and_then(|level| claims.claim(level, input)))
            .collect();
        claimed
            .into_par_iter()
            .zip(inputs.par_iter())
            .map(|(level, input)| finish(input, level, &options.output_dir))
            .collect()
    } else {
        let mut outcomes = Vec::with_capacity(inputs.len());
        for input in inputs {
            let level =
                convert_file(converter, input).and_then(|level| claims.claim(level, input));
            let outcome = finish(input, level, &options.output_dir);
            let failed = outcome.result.is_err();
            outcomes.push(outcome);
            if failed && !options.keep_going {
                break;
            }
        }
        outcomes
    };

    BatchReport { outcomes }
}

/// Write a converted level, or record why it never got that far
fn finish(input: &Path, level: Result<ConvertedLevel>, output_dir: &Path) -> DocumentOutcome {
    let result = level.and_then(|level| {
        let artifacts = write_artifacts(&level, output_dir)?;
        Ok((artifacts, level.stats))
    });
    if let Err(err) = &result {
        tracing::error!(input = %input.display(), error = %err, "Conversion failed");
    }
    DocumentOutcome {
        input: input.to_path_buf(),
        result,
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| Error::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}

fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).map_err(|source| Error::WriteOutput {
        path: to.to_path_buf(),
        source,
    })
}
