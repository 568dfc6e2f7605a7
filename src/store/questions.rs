use std::{collections::BTreeSet, path::PathBuf, sync::Arc};

use rand::{seq::SliceRandom, Rng};

use crate::{
    error::{QuizError, Result},
    models::Question,
};

/// Where the catalog comes from.
#[derive(Clone)]
enum Source {
    File(PathBuf),
    Memory(Arc<Vec<Question>>),
}

/// Read-only access to the question catalog.
///
/// The file is re-read on every [`QuestionStore::all`] call; there is no cache.
#[derive(Clone)]
pub struct QuestionStore {
    source: Source,
}

impl QuestionStore {
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::File(path.into()),
        }
    }

    pub fn in_memory(questions: Vec<Question>) -> Self {
        Self {
            source: Source::Memory(Arc::new(questions)),
        }
    }

    pub async fn all(&self) -> Result<Vec<Question>> {
        match &self.source {
            Source::Memory(questions) => Ok(questions.as_ref().clone()),
            Source::File(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|source| QuizError::Io {
                    path: path.clone(),
                    source,
                })?;
                let questions: Vec<Question> =
                    serde_json::from_slice(&bytes).map_err(|source| QuizError::Json {
                        path: path.clone(),
                        source,
                    })?;
                tracing::debug!("loaded {} questions from {}", questions.len(), path.display());
                Ok(questions)
            }
        }
    }

    /// Loads the catalog once so a request can query it several times.
    pub async fn catalog(&self) -> Result<Catalog> {
        Ok(Catalog::new(self.all().await?))
    }

    pub async fn by_chapter(&self, name: &str) -> Result<Vec<Question>> {
        Ok(self.catalog().await?.by_chapter(name))
    }

    pub async fn by_id(&self, id: i64) -> Result<Question> {
        self.catalog().await?.by_id(id).cloned()
    }

    pub async fn search(&self, keyword: &str) -> Result<Vec<Question>> {
        Ok(self.catalog().await?.search(keyword))
    }

    pub async fn sample(&self, n: i64) -> Result<Vec<Question>> {
        let catalog = self.catalog().await?;
        catalog.sample(n, &mut rand::thread_rng())
    }

    pub async fn chapters(&self) -> Result<Vec<String>> {
        Ok(self.catalog().await?.chapters())
    }
}

/// A loaded snapshot of the catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }

    pub fn by_chapter(&self, name: &str) -> Vec<Question> {
        self.questions
            .iter()
            .filter(|q| q.chapter == name)
            .cloned()
            .collect()
    }

    /// First question carrying `id`.
    pub fn by_id(&self, id: i64) -> Result<&Question> {
        self.questions
            .iter()
            .find(|q| q.id == id)
            .ok_or(QuizError::NotFound(id))
    }

    /// Every question whose id appears in `ids`, in catalog order.
    pub fn by_ids(&self, ids: &[i64]) -> Vec<Question> {
        self.questions
            .iter()
            .filter(|q| ids.contains(&q.id))
            .cloned()
            .collect()
    }

    /// Case-sensitive substring match on the question text.
    pub fn search(&self, keyword: &str) -> Vec<Question> {
        if keyword.is_empty() {
            return Vec::new();
        }
        self.questions
            .iter()
            .filter(|q| q.question.contains(keyword))
            .cloned()
            .collect()
    }

    /// Uniform sample without replacement, capped at the catalog size.
    pub fn sample<R: Rng + ?Sized>(&self, n: i64, rng: &mut R) -> Result<Vec<Question>> {
        if n < 0 {
            return Err(QuizError::InvalidArgument(format!(
                "sample size must not be negative, got {n}"
            )));
        }
        let amount = (n as usize).min(self.questions.len());
        Ok(self
            .questions
            .choose_multiple(rng, amount)
            .cloned()
            .collect())
    }

    pub fn chapters(&self) -> Vec<String> {
        self.questions
            .iter()
            .map(|q| q.chapter.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use serde_json::Map;

    use super::*;

    fn q(id: i64, chapter: &str, text: &str) -> Question {
        Question {
            id,
            chapter: chapter.to_string(),
            question: text.to_string(),
            answer: "A".to_string(),
            extra: Map::new(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            q(1, "明朝", "郑和下西洋始于哪一年"),
            q(2, "清朝", "康熙帝平定三藩"),
            q(1, "清朝", "雍正帝设立军机处"),
            q(3, "明朝", "朱元璋废除丞相"),
        ])
    }

    #[test]
    fn by_id_returns_first_match() {
        let catalog = catalog();
        let found = catalog.by_id(1).unwrap();
        assert_eq!(found.chapter, "明朝");
        assert!(matches!(catalog.by_id(99), Err(QuizError::NotFound(99))));
    }

    #[test]
    fn by_ids_keeps_duplicate_ids() {
        let found = catalog().by_ids(&[1]);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn search_is_case_sensitive_and_empty_keyword_finds_nothing() {
        let catalog = Catalog::new(vec![q(1, "x", "The Ming fleet"), q(2, "x", "the ming court")]);
        assert!(catalog.search("").is_empty());
        assert_eq!(catalog.search("Ming").len(), 1);
        assert_eq!(catalog.search("ming").len(), 1);
        assert_eq!(catalog.search("m").len(), 1);
    }

    #[test]
    fn sample_is_capped_and_rejects_negative() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(catalog.sample(10, &mut rng).unwrap().len(), 4);
        assert_eq!(catalog.sample(2, &mut rng).unwrap().len(), 2);
        assert!(catalog.sample(0, &mut rng).unwrap().is_empty());
        assert!(matches!(
            catalog.sample(-1, &mut rng),
            Err(QuizError::InvalidArgument(_))
        ));
    }

    #[test]
    fn sample_does_not_repeat_records() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(42);
        let picked = catalog.sample(4, &mut rng).unwrap();
        for (i, a) in picked.iter().enumerate() {
            for b in &picked[i + 1..] {
                assert!(!a.same_identity(b));
            }
        }
    }

    #[test]
    fn chapters_are_distinct_and_sorted() {
        let chapters = catalog().chapters();
        let mut expected = vec!["明朝".to_string(), "清朝".to_string()];
        expected.sort();
        assert_eq!(chapters, expected);
    }
}
