use crate::csv_import::ImportedRecord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Class filter value meaning "no filter".
pub const ALL_CLASSES: &str = "Semua Kelas";

pub trait DirectoryEntry: Clone {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn display_name(&self) -> &str;
    /// NISN for students, NIP for teachers.
    fn identity_number(&self) -> &str;
    /// Extra values matched case-insensitively by `Directory::search`.
    fn search_tags(&self) -> &[String] {
        &[]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub nama: String,
    pub nis: String,
    pub nisn: String,
    pub kelas: String,
    pub foto: String,
    pub alamat: String,
    pub telepon: String,
    pub nama_wali: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tanggal_lulus: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentInput {
    pub nama: String,
    pub nis: String,
    pub nisn: String,
    pub kelas: String,
    pub foto: String,
    pub alamat: String,
    pub telepon: String,
    pub nama_wali: String,
    pub tanggal_lulus: Option<String>,
}

impl Student {
    pub fn from_input(id: String, input: StudentInput) -> Self {
        Self {
            id,
            nama: input.nama,
            nis: input.nis,
            nisn: input.nisn,
            kelas: input.kelas,
            foto: input.foto,
            alamat: input.alamat,
            telepon: input.telepon,
            nama_wali: input.nama_wali,
            tanggal_lulus: input.tanggal_lulus.and_then(|s| non_empty(&s)),
        }
    }

    pub fn from_record(record: &ImportedRecord) -> Self {
        Self {
            id: record.id.clone(),
            nama: record.text("nama").to_string(),
            nis: record.text("nis").to_string(),
            nisn: record.text("nisn").to_string(),
            kelas: record.text("kelas").to_string(),
            foto: record.text("foto").to_string(),
            alamat: record.text("alamat").to_string(),
            telepon: record.text("telepon").to_string(),
            nama_wali: record.text("namaWali").to_string(),
            tanggal_lulus: non_empty(record.text("tanggalLulus")),
        }
    }
}

impl DirectoryEntry for Student {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn display_name(&self) -> &str {
        &self.nama
    }

    fn identity_number(&self) -> &str {
        &self.nisn
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: String,
    pub nama: String,
    pub nip: String,
    pub mata_pelajaran: Vec<String>,
    pub foto: String,
    pub email: String,
    pub telepon: String,
}

/// Subjects as typed into the form: either a list or "A, B, C".
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SubjectsInput {
    List(Vec<String>),
    Text(String),
}

impl Default for SubjectsInput {
    fn default() -> Self {
        SubjectsInput::List(Vec::new())
    }
}

impl SubjectsInput {
    pub fn into_subjects(self) -> Vec<String> {
        let parts = match self {
            SubjectsInput::List(items) => items,
            SubjectsInput::Text(text) => text.split(',').map(str::to_string).collect(),
        };
        parts
            .iter()
            .filter_map(|s| non_empty(s))
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeacherInput {
    pub nama: String,
    pub nip: String,
    pub mata_pelajaran: SubjectsInput,
    pub foto: String,
    pub email: String,
    pub telepon: String,
}

impl Teacher {
    pub fn from_input(id: String, input: TeacherInput) -> Self {
        Self {
            id,
            nama: input.nama,
            nip: input.nip,
            mata_pelajaran: input.mata_pelajaran.into_subjects(),
            foto: input.foto,
            email: input.email,
            telepon: input.telepon,
        }
    }

    pub fn from_record(record: &ImportedRecord) -> Self {
        Self {
            id: record.id.clone(),
            nama: record.text("nama").to_string(),
            nip: record.text("nip").to_string(),
            mata_pelajaran: record.list("mataPelajaran").to_vec(),
            foto: record.text("foto").to_string(),
            email: record.text("email").to_string(),
            telepon: record.text("telepon").to_string(),
        }
    }
}

impl DirectoryEntry for Teacher {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn display_name(&self) -> &str {
        &self.nama
    }

    fn identity_number(&self) -> &str {
        &self.nip
    }

    fn search_tags(&self) -> &[String] {
        &self.mata_pelajaran
    }
}

pub fn new_entry_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

/// In-memory directory list, most recent entry first.
#[derive(Debug, Clone)]
pub struct Directory<T> {
    entries: Vec<T>,
}

impl<T: DirectoryEntry> Default for Directory<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: DirectoryEntry> Directory<T> {
    pub fn new(entries: Vec<T>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn list(&self) -> &[T] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Puts a whole batch in front of the existing entries, keeping batch order.
    pub fn prepend_batch(&mut self, mut batch: Vec<T>) {
        batch.append(&mut self.entries);
        self.entries = batch;
    }

    pub fn create(&mut self, entry: T) -> &T {
        self.entries.insert(0, entry);
        &self.entries[0]
    }

    /// Replaces the entry's fields; the stored id never changes.
    pub fn update(&mut self, id: &str, mut entry: T) -> Option<&T> {
        let pos = self.entries.iter().position(|e| e.id() == id)?;
        entry.set_id(id.to_string());
        self.entries[pos] = entry;
        Some(&self.entries[pos])
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id() != id);
        self.entries.len() != before
    }

    /// Case-insensitive match on the name and search tags, plain substring on
    /// the identity number. A blank term returns the whole list.
    pub fn search(&self, term: &str) -> Vec<&T> {
        let term = term.trim();
        if term.is_empty() {
            return self.list().iter().collect();
        }
        let needle = term.to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                e.display_name().to_lowercase().contains(&needle)
                    || e.identity_number().contains(term)
                    || e
                        .search_tags()
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(&needle))
            })
            .collect()
    }
}

impl Directory<Student> {
    pub fn classes(&self) -> Vec<String> {
        let mut out: Vec<String> = self.entries.iter().map(|s| s.kelas.clone()).collect();
        out.sort();
        out.dedup();
        out
    }

    pub fn filter(&self, term: &str, kelas: Option<&str>) -> Vec<&Student> {
        let kelas = kelas.map(str::trim).filter(|k| !k.is_empty() && *k != ALL_CLASSES);
        self.search(term)
            .into_iter()
            .filter(|s| kelas.map(|k| s.kelas == k).unwrap_or(true))
            .collect()
    }
}
