//! The zip container holding a document's parts.
use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::DocxError;
use crate::skeleton;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Part {
    name: String,
    data: Vec<u8>,
}

/// An in-memory OOXML package: named parts in container order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    parts: Vec<Part>,
}

impl Package {
    /// The built-in blank package.
    pub fn skeleton() -> Self {
        Self {
            parts: skeleton::PARTS
                .iter()
                .map(|(name, data)| Part {
                    name: (*name).to_string(),
                    data: data.as_bytes().to_vec(),
                })
                .collect(),
        }
    }

    /// Reads every file entry of a zip container. Directory entries are
    /// dropped; they carry no content.
    pub fn read(bytes: &[u8]) -> Result<Self, DocxError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut parts = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            if entry.is_dir() {
                continue;
            }
            let mut data = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
            entry.read_to_end(&mut data)?;
            parts.push(Part {
                name: entry.name().to_string(),
                data,
            });
        }
        Ok(Self { parts })
    }

    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.data.as_slice())
    }

    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|p| p.name.as_str())
    }

    /// Writes the package, substituting `replacement` for the part of the
    /// same name. Every other part is copied byte for byte.
    pub fn write_with(&self, replacement: (&str, &[u8])) -> Result<Vec<u8>, DocxError> {
        let (replaced, replacement_data) = replacement;
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for part in &self.parts {
            writer.start_file(part.name.as_str(), options)?;
            if part.name == replaced {
                writer.write_all(replacement_data)?;
            } else {
                writer.write_all(&part.data)?;
            }
        }
        Ok(writer.finish()?.into_inner())
    }
}
