use crate::config::Config;
use crate::directory::{Directory, Student, Teacher};
use crate::seed;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub config: Config,
    pub students: Directory<Student>,
    pub teachers: Directory<Teacher>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let (students, teachers) = if config.seed_mock_data {
            (seed::students(), seed::teachers())
        } else {
            (Vec::new(), Vec::new())
        };
        Self {
            config,
            students: Directory::new(students),
            teachers: Directory::new(teachers),
        }
    }
}
