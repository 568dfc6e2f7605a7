// Quiz engine: selects and pins a round's questions, then grades the pinned
// set and feeds the results into the wrong book and the session.

mod grading;
mod selection;

pub use grading::{grade, percentage, MissedQuestion, Tally};

use std::collections::HashMap;

use rand::{rngs::StdRng, SeedableRng};

use crate::{
    error::{QuizError, Result},
    models::Question,
    session::SessionStore,
    store::{BookChange, Catalog, QuestionStore, WrongBookStore},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoundKind {
    Random10,
    ByChapter(String),
    AllWrong,
    LastWrong,
}

impl RoundKind {
    /// Practice rounds drawn from earlier mistakes; correct answers clear them.
    pub fn clears_on_correct(&self) -> bool {
        matches!(self, RoundKind::AllWrong | RoundKind::LastWrong)
    }

    /// Rounds whose misses feed the next last-missed round.
    pub fn tracks_last_missed(&self) -> bool {
        matches!(self, RoundKind::Random10 | RoundKind::ByChapter(_))
    }

    pub fn label(&self) -> String {
        match self {
            RoundKind::Random10 => "Random quiz".to_string(),
            RoundKind::ByChapter(chapter) => format!("Chapter: {chapter}"),
            RoundKind::AllWrong => "Wrong-book practice".to_string(),
            RoundKind::LastWrong => "Last round's mistakes".to_string(),
        }
    }
}

/// Outcome of starting a round.
#[derive(Debug, Clone)]
pub enum RoundStart {
    Pinned(Vec<Question>),
    NoQuestions,
}

/// A graded round.
#[derive(Debug, Clone)]
pub struct RoundReport {
    pub kind: RoundKind,
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub missed: Vec<MissedQuestion>,
    pub book: BookChange,
}

/// Outcome of grading a round.
#[derive(Debug, Clone)]
pub enum RoundOutcome {
    Graded(RoundReport),
    NoQuestions,
}

#[derive(Clone)]
pub struct QuizEngine {
    questions: QuestionStore,
    wrong_book: WrongBookStore,
    sessions: SessionStore,
}

impl QuizEngine {
    pub fn new(questions: QuestionStore, wrong_book: WrongBookStore, sessions: SessionStore) -> Self {
        Self {
            questions,
            wrong_book,
            sessions,
        }
    }

    pub fn questions(&self) -> &QuestionStore {
        &self.questions
    }

    pub fn wrong_book(&self) -> &WrongBookStore {
        &self.wrong_book
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Selects the questions for `kind` and pins them for the session.
    pub async fn start(&self, token: &str, kind: &RoundKind) -> Result<RoundStart> {
        self.start_seeded(token, kind, rand::random::<u64>()).await
    }

    pub async fn start_seeded(&self, token: &str, kind: &RoundKind, seed: u64) -> Result<RoundStart> {
        let selected = match kind {
            RoundKind::Random10 => {
                let catalog = self.questions.catalog().await?;
                selection::random_round(&catalog, &mut StdRng::seed_from_u64(seed))?
            }
            RoundKind::ByChapter(chapter) => {
                let catalog = self.questions.catalog().await?;
                selection::chapter_round(&catalog, chapter, &mut StdRng::seed_from_u64(seed))
            }
            RoundKind::AllWrong => {
                let entries = self.wrong_book.load_all().await?;
                selection::shuffled(entries, &mut StdRng::seed_from_u64(seed))
            }
            RoundKind::LastWrong => {
                let catalog = self.questions.catalog().await?;
                let ids = self.sessions.take_last_missed(token).await;
                selection::last_missed_round(&catalog, &ids, &mut StdRng::seed_from_u64(seed))
            }
        };

        if selected.is_empty() {
            tracing::info!("no questions available for {kind:?}");
            return Ok(RoundStart::NoQuestions);
        }

        tracing::info!("starting {kind:?} round with {} questions", selected.len());
        self.sessions.pin(token, kind, selected.clone()).await;
        Ok(RoundStart::Pinned(selected))
    }

    /// Grades `answers` against the session's pinned set for `kind`.
    ///
    /// The pin is consumed even if grading fails afterwards. Without a live
    /// pin the set is rebuilt by `fallback_round`.
    pub async fn grade(
        &self,
        token: &str,
        kind: &RoundKind,
        answers: &HashMap<String, String>,
    ) -> Result<RoundOutcome> {
        let pinned = self.sessions.take_pin(token, kind).await;
        let questions = if pinned.is_empty() {
            tracing::warn!("no pinned questions for {kind:?}, rebuilding the round");
            match self.fallback_round(kind, answers).await? {
                Some(questions) => questions,
                None => return Ok(RoundOutcome::NoQuestions),
            }
        } else {
            pinned
        };

        let tally = grade(&questions, answers);

        let removals: &[i64] = if kind.clears_on_correct() {
            &tally.correct_ids
        } else {
            &[]
        };
        let additions = tally.missed.iter().map(|m| m.question.clone()).collect();
        let book = self.wrong_book.apply(removals, additions).await?;

        if kind.tracks_last_missed() {
            self.sessions
                .set_last_missed(token, tally.missed_ids())
                .await;
        }

        let percentage = tally.percentage();
        tracing::info!(
            "graded {kind:?} round: {}/{} ({percentage}%), book +{} -{}",
            tally.score,
            tally.total,
            book.added,
            book.removed
        );

        Ok(RoundOutcome::Graded(RoundReport {
            kind: kind.clone(),
            score: tally.score,
            total: tally.total,
            percentage,
            missed: tally.missed,
            book,
        }))
    }

    /// Rebuilds a round's question set when the session holds no pin.
    ///
    /// Chapter rounds take the whole chapter and wrong-book rounds the whole
    /// book (`None` when it is empty). Random and last-missed rounds resolve
    /// the submitted ids against the catalog.
    async fn fallback_round(
        &self,
        kind: &RoundKind,
        answers: &HashMap<String, String>,
    ) -> Result<Option<Vec<Question>>> {
        match kind {
            RoundKind::ByChapter(chapter) => Ok(Some(self.questions.by_chapter(chapter).await?)),
            RoundKind::AllWrong => {
                let entries = self.wrong_book.load_all().await?;
                Ok((!entries.is_empty()).then_some(entries))
            }
            RoundKind::Random10 | RoundKind::LastWrong => {
                let catalog = self.questions.catalog().await?;
                resolve_submitted(&catalog, answers).map(Some)
            }
        }
    }
}

fn resolve_submitted(catalog: &Catalog, answers: &HashMap<String, String>) -> Result<Vec<Question>> {
    let mut ids = answers
        .keys()
        .map(|key| {
            key.trim()
                .parse::<i64>()
                .map_err(|_| QuizError::InvalidArgument(format!("not a question id: {key:?}")))
        })
        .collect::<Result<Vec<_>>>()?;
    ids.sort_unstable();

    ids.into_iter()
        .map(|id| catalog.by_id(id).cloned())
        .collect()
}
