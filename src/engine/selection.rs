use rand::{seq::SliceRandom, Rng};

use crate::{error::Result, models::Question, names, store::Catalog};

/// Random round: up to [`names::ROUND_SIZE`] distinct records.
pub fn random_round<R: Rng + ?Sized>(catalog: &Catalog, rng: &mut R) -> Result<Vec<Question>> {
    catalog.sample(names::ROUND_SIZE, rng)
}

/// Chapter round: the whole chapter in a fresh order.
pub fn chapter_round<R: Rng + ?Sized>(catalog: &Catalog, chapter: &str, rng: &mut R) -> Vec<Question> {
    shuffled(catalog.by_chapter(chapter), rng)
}

/// Last-missed round: every catalog record whose id was missed.
pub fn last_missed_round<R: Rng + ?Sized>(catalog: &Catalog, ids: &[i64], rng: &mut R) -> Vec<Question> {
    if ids.is_empty() {
        return Vec::new();
    }
    shuffled(catalog.by_ids(ids), rng)
}

pub fn shuffled<R: Rng + ?Sized>(mut questions: Vec<Question>, rng: &mut R) -> Vec<Question> {
    questions.shuffle(rng);
    questions
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use serde_json::Map;

    use super::*;

    fn q(id: i64, chapter: &str) -> Question {
        Question {
            id,
            chapter: chapter.to_string(),
            question: format!("{chapter} question {id}"),
            answer: "A".to_string(),
            extra: Map::new(),
        }
    }

    fn catalog(n: i64) -> Catalog {
        Catalog::new(
            (1..=n)
                .map(|i| q(i, if i % 2 == 0 { "Ming" } else { "Qing" }))
                .collect(),
        )
    }

    #[test]
    fn random_round_takes_ten_when_available() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_round(&catalog(25), &mut rng).unwrap().len(), 10);
        assert_eq!(random_round(&catalog(4), &mut rng).unwrap().len(), 4);
    }

    #[test]
    fn chapter_round_is_a_permutation_of_the_chapter() {
        let mut rng = StdRng::seed_from_u64(3);
        let catalog = catalog(20);
        let mut round: Vec<i64> = chapter_round(&catalog, "Ming", &mut rng)
            .iter()
            .map(|q| q.id)
            .collect();
        round.sort();
        let expected: Vec<i64> = (1..=20).filter(|i| i % 2 == 0).collect();
        assert_eq!(round, expected);
    }

    #[test]
    fn last_missed_round_resolves_membership() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut catalog_questions = catalog(6).into_questions();
        catalog_questions.push(q(3, "Ming"));
        let catalog = Catalog::new(catalog_questions);

        let round = last_missed_round(&catalog, &[3, 4, 42], &mut rng);
        assert_eq!(round.len(), 3);
        assert!(last_missed_round(&catalog, &[], &mut rng).is_empty());
    }
}
