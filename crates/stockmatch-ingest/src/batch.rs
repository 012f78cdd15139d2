//! Grouping of a flat upload into per-folder batches.

use stockmatch_core::{FileRole, RoleRules};

use crate::decode::SourceFile;

/// Folder key for files uploaded without any directory component.
pub const ROOT_FOLDER: &str = "Root";

/// The files of one store folder, in upload order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderBatch {
    pub folder: String,
    pub files: Vec<SourceFile>,
}

impl FolderBatch {
    /// First file whose lower-cased name contains the role's pattern.
    #[must_use]
    pub fn role_file(&self, role: FileRole, rules: &RoleRules) -> Option<&SourceFile> {
        let pattern = match role {
            FileRole::Deadstock => &rules.deadstock_file_pattern,
            FileRole::Usage => &rules.usage_file_pattern,
        }
        .to_lowercase();
        self.files
            .iter()
            .find(|f| f.file_name().to_lowercase().contains(&pattern))
    }
}

/// Folder key of a relative path: its penultimate segment.
///
/// `"AllStores/Sano/ZaikoKin.csv"` and `"Sano/ZaikoKin.csv"` both belong to
/// `"Sano"`; a bare file name belongs to [`ROOT_FOLDER`].
#[must_use]
pub fn folder_key(relative_path: &str) -> &str {
    let mut segments = relative_path
        .split(['/', '\\'])
        .filter(|s| !s.is_empty())
        .rev();
    segments.next();
    segments.next().unwrap_or(ROOT_FOLDER)
}

/// Buckets `files` by [`folder_key`]. Folders keep the order in which their
/// first file appears; files keep their upload order within a folder.
#[must_use]
pub fn group_by_folder(files: Vec<SourceFile>) -> Vec<FolderBatch> {
    let mut batches: Vec<FolderBatch> = Vec::new();
    for file in files {
        let key = folder_key(&file.relative_path).to_string();
        match batches.iter_mut().find(|b| b.folder == key) {
            Some(batch) => batch.files.push(file),
            None => batches.push(FolderBatch {
                folder: key,
                files: vec![file],
            }),
        }
    }
    batches
}
