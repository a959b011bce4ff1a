/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Playground pattern interpreter.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 *
 * 1. OPEN SOURCE: You may use this file under the terms of the GNU Affero
 * General Public License v3.0. If you link to this code, your ENTIRE
 * application must be open-sourced under AGPLv3.
 *
 * 2. COMMERCIAL: For proprietary use, you must obtain a Commercial License
 * from Sovereign Systems.
 *
 * NO IMPLIED LICENSE to rights of Mohamad Al-Zawahreh or Sovereign Systems.
 */

//! Learner progress: XP, levels and course stars.
//!
//! Progress lives outside the interpreter. The host records a completed
//! lesson after a correctly ordered lesson run; nothing in the interpreter
//! reads it back.

use crate::scenario::ScenarioId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON Parse Error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Integrity Error: Hash Mismatch. Expected {expected}, computed {computed}.")]
    HashMismatch { expected: String, computed: String },
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub xp: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Course {
    pub id: ScenarioId,
    pub name: &'static str,
    pub lessons: &'static [LessonInfo],
}

const fn lesson(id: &'static str, name: &'static str, xp: u32) -> LessonInfo {
    LessonInfo { id, name, xp }
}

const COURSES: &[Course] = &[
    Course {
        id: ScenarioId::Programming,
        name: "Programming basics",
        lessons: &[
            lesson("basic_output", "Basic output", 10),
            lesson("variables", "Variables", 15),
            lesson("conditions", "Conditions", 20),
            lesson("loops", "Loops", 25),
        ],
    },
    Course {
        id: ScenarioId::Algorithm,
        name: "Algorithms",
        lessons: &[
            lesson("array_basics", "Array basics", 15),
            lesson("sorting", "Sorting", 25),
            lesson("searching", "Searching", 20),
            lesson("complexity", "Complexity", 30),
        ],
    },
    Course {
        id: ScenarioId::DataStructure,
        name: "Data structures",
        lessons: &[
            lesson("stack_ops", "Stack operations", 20),
            lesson("queue_ops", "Queue operations", 20),
            lesson("tree_basics", "Trees", 30),
            lesson("graph_intro", "Graphs", 35),
        ],
    },
    Course {
        id: ScenarioId::Math,
        name: "Math",
        lessons: &[
            lesson("functions", "Functions", 15),
            lesson("geometry", "Geometry", 20),
            lesson("calculations", "Calculations", 25),
            lesson("modeling", "Modeling", 30),
        ],
    },
    Course {
        id: ScenarioId::Physics,
        name: "Physics",
        lessons: &[
            lesson("gravity", "Gravity", 25),
            lesson("forces", "Forces", 30),
            lesson("collisions", "Collisions", 35),
            lesson("particles", "Particles", 40),
        ],
    },
    Course {
        id: ScenarioId::Game,
        name: "Game development",
        lessons: &[
            lesson("player_control", "Player control", 20),
            lesson("scoring", "Scoring", 25),
            lesson("entities", "Entities", 30),
            lesson("game_loop", "Game loop", 35),
        ],
    },
];

pub fn courses() -> &'static [Course] {
    COURSES
}

pub fn course(id: ScenarioId) -> Option<&'static Course> {
    COURSES.iter().find(|c| c.id == id)
}

/// The lesson a scenario's drag-and-drop exercise counts towards.
pub fn current_lesson(scenario: ScenarioId) -> &'static str {
    match scenario {
        ScenarioId::Programming => "basic_output",
        ScenarioId::Algorithm => "array_basics",
        ScenarioId::DataStructure => "stack_ops",
        ScenarioId::Math => "functions",
        ScenarioId::Physics => "gravity",
        ScenarioId::Game => "player_control",
        _ => "basic_output",
    }
}

// ─── Record ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub total_xp: u32,
    pub level: u32,
    /// Keyed `course_lesson`, valued with the completion time.
    pub completed_lessons: BTreeMap<String, DateTime<Utc>>,
    pub completed_courses: Vec<ScenarioId>,
    pub stars: u32,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        ProgressRecord {
            total_xp: 0,
            level: 1,
            completed_lessons: BTreeMap::new(),
            completed_courses: Vec::new(),
            stars: 0,
        }
    }
}

fn lesson_key(course: ScenarioId, lesson: &str) -> String {
    format!("{}_{}", course, lesson)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reward {
    AlreadyCompleted,
    Granted {
        xp_gained: u32,
        total_xp: u32,
        level: u32,
        level_up: bool,
        course_completed: bool,
        stars: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseProgress {
    pub completed: usize,
    pub total: usize,
    pub percentage: u32,
}

// ─── Stores ──────────────────────────────────────────────────────────────────

pub trait ProgressStore {
    fn load(&self) -> Result<Option<ProgressRecord>, ProgressError>;
    fn save(&mut self, record: &ProgressRecord) -> Result<(), ProgressError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Option<ProgressRecord>,
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<Option<ProgressRecord>, ProgressError> {
        Ok(self.record.clone())
    }

    fn save(&mut self, record: &ProgressRecord) -> Result<(), ProgressError> {
        self.record = Some(record.clone());
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    checksum: String,
    record: serde_json::Value,
}

/// JSON file holding the record next to a SHA-256 checksum of its canonical
/// form. A file whose checksum does not match is refused.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }
}

fn checksum(record: &serde_json::Value) -> Result<String, ProgressError> {
    let canonical = serde_json::to_string(record)?;
    Ok(hex::encode(Sha256::digest(canonical.as_bytes())))
}

impl ProgressStore for FileStore {
    fn load(&self) -> Result<Option<ProgressRecord>, ProgressError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let envelope: Envelope = serde_json::from_str(&text)?;
        let computed = checksum(&envelope.record)?;
        if computed != envelope.checksum {
            return Err(ProgressError::HashMismatch {
                expected: envelope.checksum,
                computed,
            });
        }
        Ok(Some(serde_json::from_value(envelope.record)?))
    }

    fn save(&mut self, record: &ProgressRecord) -> Result<(), ProgressError> {
        let record = serde_json::to_value(record)?;
        let envelope = Envelope {
            checksum: checksum(&record)?,
            record,
        };
        fs::write(&self.path, serde_json::to_string_pretty(&envelope)?)?;
        Ok(())
    }
}

// ─── Tracker ─────────────────────────────────────────────────────────────────

fn is_course_complete(record: &ProgressRecord, course: &Course) -> bool {
    course
        .lessons
        .iter()
        .all(|l| record.completed_lessons.contains_key(&lesson_key(course.id, l.id)))
}

pub struct ProgressTracker<S: ProgressStore> {
    store: S,
    record: ProgressRecord,
}

impl<S: ProgressStore> ProgressTracker<S> {
    pub fn load(store: S) -> Result<Self, ProgressError> {
        let record = store.load()?.unwrap_or_default();
        Ok(ProgressTracker { store, record })
    }

    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    pub fn complete_current(&mut self, scenario: ScenarioId) -> Result<Option<Reward>, ProgressError> {
        self.complete_lesson(scenario, current_lesson(scenario))
    }

    pub fn complete_lesson(
        &mut self,
        course_id: ScenarioId,
        lesson_id: &str,
    ) -> Result<Option<Reward>, ProgressError> {
        self.complete_lesson_at(course_id, lesson_id, Utc::now())
    }

    /// Returns `None` for a lesson that is not in the catalog.
    pub fn complete_lesson_at(
        &mut self,
        course_id: ScenarioId,
        lesson_id: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<Reward>, ProgressError> {
        let Some(course) = course(course_id) else {
            return Ok(None);
        };
        let Some(lesson) = course.lessons.iter().find(|l| l.id == lesson_id) else {
            return Ok(None);
        };
        let key = lesson_key(course_id, lesson_id);
        if self.record.completed_lessons.contains_key(&key) {
            return Ok(Some(Reward::AlreadyCompleted));
        }

        let mut next = self.record.clone();
        next.completed_lessons.insert(key, at);
        next.total_xp += lesson.xp;
        let level = next.total_xp / 100 + 1;
        let level_up = level > next.level;
        next.level = level;

        let course_completed = is_course_complete(&next, course);
        if course_completed && !next.completed_courses.contains(&course_id) {
            next.completed_courses.push(course_id);
            next.stars += 1;
        }
        // Commit only once the store holds it, so a failed save can be retried.
        self.store.save(&next)?;
        self.record = next;
        info!(course = %course_id, lesson = lesson_id, xp = lesson.xp, level, "lesson completed");

        Ok(Some(Reward::Granted {
            xp_gained: lesson.xp,
            total_xp: self.record.total_xp,
            level,
            level_up,
            course_completed,
            stars: self.record.stars,
        }))
    }

    pub fn course_progress(&self, course_id: ScenarioId) -> Option<CourseProgress> {
        let course = course(course_id)?;
        let completed = course
            .lessons
            .iter()
            .filter(|l| {
                self.record
                    .completed_lessons
                    .contains_key(&lesson_key(course_id, l.id))
            })
            .count();
        let total = course.lessons.len();
        Some(CourseProgress {
            completed,
            total,
            percentage: (completed * 100 / total) as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tracker() -> ProgressTracker<MemoryStore> {
        ProgressTracker::load(MemoryStore::default()).unwrap()
    }

    #[test]
    fn test_xp_and_repeat_completion() {
        let mut t = tracker();
        let reward = t
            .complete_lesson(ScenarioId::Programming, "basic_output")
            .unwrap();
        assert_eq!(
            reward,
            Some(Reward::Granted {
                xp_gained: 10,
                total_xp: 10,
                level: 1,
                level_up: false,
                course_completed: false,
                stars: 0
            })
        );
        let again = t
            .complete_lesson(ScenarioId::Programming, "basic_output")
            .unwrap();
        assert_eq!(again, Some(Reward::AlreadyCompleted));
        assert_eq!(t.record().total_xp, 10);
    }

    #[test]
    fn test_course_completion_grants_one_star_and_levels() {
        let mut t = tracker();
        for id in ["stack_ops", "queue_ops", "tree_basics"] {
            t.complete_lesson(ScenarioId::DataStructure, id).unwrap();
        }
        let reward = t
            .complete_lesson(ScenarioId::DataStructure, "graph_intro")
            .unwrap();
        assert_eq!(
            reward,
            Some(Reward::Granted {
                xp_gained: 35,
                total_xp: 105,
                level: 2,
                level_up: true,
                course_completed: true,
                stars: 1
            })
        );
        assert_eq!(
            t.course_progress(ScenarioId::DataStructure),
            Some(CourseProgress {
                completed: 4,
                total: 4,
                percentage: 100
            })
        );
    }

    #[test]
    fn test_unknown_lesson() {
        let mut t = tracker();
        assert_eq!(t.complete_lesson(ScenarioId::Math, "calculus").unwrap(), None);
        assert_eq!(t.complete_current(ScenarioId::Hash).unwrap(), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();

        let mut t = ProgressTracker::load(FileStore::new(&path)).unwrap();
        t.complete_lesson_at(ScenarioId::Physics, "gravity", at).unwrap();

        let reloaded = ProgressTracker::load(FileStore::new(&path)).unwrap();
        assert_eq!(reloaded.record().total_xp, 25);
        assert_eq!(
            reloaded.record().completed_lessons.get("physics_gravity"),
            Some(&at)
        );
    }

    #[test]
    fn test_file_store_detects_tampering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        let mut store = FileStore::new(&path);
        store.save(&ProgressRecord::default()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        fs::write(&path, text.replace("\"total_xp\": 0", "\"total_xp\": 900")).unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, ProgressError::HashMismatch { .. }));
    }

    /// Store that refuses the first `failures` saves.
    struct FlakyStore {
        failures: usize,
        saved: Option<ProgressRecord>,
    }

    impl ProgressStore for FlakyStore {
        fn load(&self) -> Result<Option<ProgressRecord>, ProgressError> {
            Ok(self.saved.clone())
        }

        fn save(&mut self, record: &ProgressRecord) -> Result<(), ProgressError> {
            if self.failures > 0 {
                self.failures -= 1;
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only").into());
            }
            self.saved = Some(record.clone());
            Ok(())
        }
    }

    #[test]
    fn test_failed_save_keeps_lesson_open_for_retry() {
        let store = FlakyStore {
            failures: 1,
            saved: None,
        };
        let mut t = ProgressTracker::load(store).unwrap();

        let err = t
            .complete_lesson(ScenarioId::Programming, "basic_output")
            .unwrap_err();
        assert!(matches!(err, ProgressError::Io(_)));
        assert_eq!(t.record(), &ProgressRecord::default());

        let reward = t
            .complete_lesson(ScenarioId::Programming, "basic_output")
            .unwrap();
        assert!(matches!(reward, Some(Reward::Granted { xp_gained: 10, .. })));
        assert_eq!(t.store.saved.as_ref().map(|r| r.total_xp), Some(10));
    }

    #[test]
    fn test_missing_file_is_fresh_record() {
        let dir = tempfile::tempdir().unwrap();
        let t = ProgressTracker::load(FileStore::new(dir.path().join("none.json"))).unwrap();
        assert_eq!(t.record(), &ProgressRecord::default());
    }
}
