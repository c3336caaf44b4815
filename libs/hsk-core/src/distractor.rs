//! Multiple-choice option generation.
//!
//! Distractors are chosen in similarity tiers that depend on the side the
//! options are shown on. Every tier is shuffled before it is drawn from, so
//! ties never resolve in lexicon order, and the final option list is
//! shuffled so the correct answer lands on a uniformly random slot.

use crate::similarity::{
    first_syllable, normalize_phonetic, shared_written_count, token_overlap,
};
use crate::types::{EntryId, Side, VocabularyEntry};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Options shown per question, correct answer included.
pub const OPTION_COUNT: usize = 4;

const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;

/// Accumulates distractors across tiers, first-seen wins.
struct Picker<'a> {
    picked: Vec<&'a VocabularyEntry>,
    ids: HashSet<EntryId>,
}

impl<'a> Picker<'a> {
    fn new(correct: &VocabularyEntry) -> Self {
        Self {
            picked: Vec::with_capacity(DISTRACTOR_COUNT),
            ids: HashSet::from([correct.id]),
        }
    }

    fn is_full(&self) -> bool {
        self.picked.len() >= DISTRACTOR_COUNT
    }

    fn contains(&self, entry: &VocabularyEntry) -> bool {
        self.ids.contains(&entry.id)
    }

    /// Take from an already ordered tier until full.
    fn take(&mut self, tier: impl IntoIterator<Item = &'a VocabularyEntry>) {
        for entry in tier {
            if self.is_full() {
                break;
            }
            if self.ids.insert(entry.id) {
                self.picked.push(entry);
            }
        }
    }

    /// Shuffle a filtered tier, then take from it.
    fn take_shuffled<R: Rng + ?Sized>(&mut self, mut tier: Vec<&'a VocabularyEntry>, rng: &mut R) {
        if self.is_full() {
            return;
        }
        tier.retain(|e| !self.contains(e));
        tier.shuffle(rng);
        self.take(tier);
    }

    /// Shuffle a scored tier, order it by descending score, then take.
    /// The sort is stable, so equal scores keep their shuffled order.
    fn take_ranked<R: Rng + ?Sized>(
        &mut self,
        mut tier: Vec<(&'a VocabularyEntry, usize)>,
        rng: &mut R,
    ) {
        if self.is_full() {
            return;
        }
        tier.retain(|(e, score)| *score > 0 && !self.contains(e));
        tier.shuffle(rng);
        tier.sort_by(|a, b| b.1.cmp(&a.1));
        self.take(tier.into_iter().map(|(e, _)| e));
    }
}

/// Pick up to [`OPTION_COUNT`] distinct options for `correct`, shown on
/// `side`, drawing distractors from `candidates`.
///
/// `candidates` is normally the whole lexicon; the correct entry is skipped
/// if present. The result always contains `correct` and holds fewer than
/// [`OPTION_COUNT`] entries only when the candidates run out.
pub fn select_options<R: Rng + ?Sized>(
    correct: &VocabularyEntry,
    candidates: &[VocabularyEntry],
    side: Side,
    rng: &mut R,
) -> Vec<VocabularyEntry> {
    let others: Vec<&VocabularyEntry> = candidates.iter().filter(|c| c.id != correct.id).collect();
    let mut picker = Picker::new(correct);

    match side {
        Side::Phonetic => {
            let norm = normalize_phonetic(&correct.phonetic);
            let syllable = first_syllable(&correct.phonetic);

            let same_base = others
                .iter()
                .copied()
                .filter(|c| c.phonetic != correct.phonetic && normalize_phonetic(&c.phonetic) == norm)
                .collect();
            picker.take_shuffled(same_base, rng);

            let same_onset = others
                .iter()
                .copied()
                .filter(|c| {
                    first_syllable(&c.phonetic) == syllable && normalize_phonetic(&c.phonetic) != norm
                })
                .collect();
            picker.take_shuffled(same_onset, rng);
        }
        Side::Written => {
            let shared = others
                .iter()
                .map(|c| (*c, shared_written_count(&correct.written, &c.written)))
                .collect();
            picker.take_ranked(shared, rng);

            let length = correct.written.chars().count();
            let same_length = others
                .iter()
                .copied()
                .filter(|c| c.written.chars().count() == length)
                .collect();
            picker.take_shuffled(same_length, rng);
        }
        Side::Translation => {
            let overlapping = others
                .iter()
                .map(|c| (*c, token_overlap(&correct.translation, &c.translation)))
                .collect();
            picker.take_ranked(overlapping, rng);

            let look_alike = others
                .iter()
                .copied()
                .filter(|c| shared_written_count(&correct.written, &c.written) > 0)
                .collect();
            picker.take_shuffled(look_alike, rng);
        }
    }

    picker.take_shuffled(others, rng);

    let mut options: Vec<VocabularyEntry> = Vec::with_capacity(OPTION_COUNT);
    options.push(correct.clone());
    options.extend(picker.picked.into_iter().cloned());

    if options.len() < OPTION_COUNT {
        tracing::debug!(
            id = correct.id,
            available = options.len(),
            "not enough candidates for a full option set"
        );
    }

    options.shuffle(rng);
    tracing::debug!(
        id = correct.id,
        side = %side,
        options = ?options.iter().map(|o| o.id).collect::<Vec<_>>(),
        "generated options"
    );
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entry(id: EntryId, written: &str, phonetic: &str, translation: &str) -> VocabularyEntry {
        VocabularyEntry::new(id, written, phonetic, translation)
    }

    fn ids(options: &[VocabularyEntry]) -> HashSet<EntryId> {
        options.iter().map(|o| o.id).collect()
    }

    #[test]
    fn phonetic_prefers_tone_variants_then_onset() {
        let correct = entry(1, "坐", "zuò", "сидеть");
        let candidates = vec![
            correct.clone(),
            entry(2, "做", "zuò", "делать"),
            entry(3, "昨天", "zuótiān", "вчера"),
            entry(4, "桌子", "zhuōzi", "стол"),
            entry(5, "字", "zì", "иероглиф"),
            entry(6, "左", "zuǒ", "левый"),
            entry(7, "走", "zǒu", "идти"),
        ];

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let options = select_options(&correct, &candidates, Side::Phonetic, &mut rng);
            let picked = ids(&options);
            assert_eq!(options.len(), OPTION_COUNT);
            // 6 has the same base sound with another tone; 2 formats identically so
            // it is excluded from the first tier and only competes in the random fill.
            assert!(picked.contains(&1));
            assert!(picked.contains(&6));
            // 3 shares the "zuo" onset with a different full reading.
            assert!(picked.contains(&3));
        }
    }

    #[test]
    fn written_prefers_shared_characters_by_count() {
        let correct = entry(1, "电视", "diànshì", "телевизор");
        let candidates = vec![
            entry(2, "电影", "diànyǐng", "фильм"),
            entry(3, "电脑", "diànnǎo", "компьютер"),
            entry(4, "电视机", "diànshìjī", "телевизор"),
            entry(5, "看", "kàn", "смотреть"),
            entry(6, "吃", "chī", "есть"),
            entry(7, "中国", "Zhōngguó", "Китай"),
        ];

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let options = select_options(&correct, &candidates, Side::Written, &mut rng);
            assert_eq!(ids(&options), HashSet::from([1, 2, 3, 4]));
        }
    }

    #[test]
    fn written_ranks_higher_overlap_first() {
        let correct = entry(1, "电视", "diànshì", "телевизор");
        let candidates = vec![
            entry(2, "电影", "diànyǐng", "фильм"),
            entry(3, "电脑", "diànnǎo", "компьютер"),
            entry(4, "电话", "diànhuà", "телефон"),
            entry(5, "电车", "diànchē", "трамвай"),
            entry(6, "电视机", "diànshìjī", "телевизор"),
        ];

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let options = select_options(&correct, &candidates, Side::Written, &mut rng);
            assert!(ids(&options).contains(&6), "seed {seed}");
        }
    }

    #[test]
    fn written_falls_back_to_same_length() {
        let correct = entry(1, "茶", "chá", "чай");
        let candidates = vec![
            entry(2, "吃", "chī", "есть"),
            entry(3, "出租车", "chūzūchē", "такси"),
            entry(4, "打电话", "dǎ diànhuà", "звонить по телефону"),
            entry(5, "喝", "hē", "пить"),
            entry(6, "看", "kàn", "смотреть"),
            entry(7, "不客气", "bù kèqi", "не стоит благодарности"),
        ];

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let options = select_options(&correct, &candidates, Side::Written, &mut rng);
            assert_eq!(ids(&options), HashSet::from([1, 2, 5, 6]));
        }
    }

    #[test]
    fn translation_prefers_token_overlap_then_look_alikes() {
        let correct = entry(1, "坐", "zuò", "сидеть, ехать (на транспорте)");
        let candidates = vec![
            entry(2, "开", "kāi", "открывать, вести (на машине)"),
            entry(3, "坐下", "zuòxià", "садиться"),
            entry(4, "吃", "chī", "есть"),
            entry(5, "茶", "chá", "чай"),
            entry(6, "喝", "hē", "пить"),
            entry(7, "看", "kàn", "смотреть"),
        ];

        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let options = select_options(&correct, &candidates, Side::Translation, &mut rng);
            let picked = ids(&options);
            assert_eq!(options.len(), OPTION_COUNT);
            assert!(picked.contains(&2));
            assert!(picked.contains(&3));
        }
    }

    #[test]
    fn correct_entry_in_candidates_is_ignored() {
        let lexicon = Lexicon::hsk1().unwrap();
        let correct = lexicon.get(10).unwrap().clone();
        let mut rng = StdRng::seed_from_u64(7);
        for side in [Side::Written, Side::Phonetic, Side::Translation] {
            let options = select_options(&correct, lexicon.entries(), side, &mut rng);
            assert_eq!(options.len(), OPTION_COUNT);
            assert_eq!(ids(&options).len(), OPTION_COUNT);
            assert_eq!(options.iter().filter(|o| o.id == correct.id).count(), 1);
        }
    }

    #[test]
    fn small_lexicon_yields_fewer_options() {
        let correct = entry(1, "爱", "ài", "любить");
        let candidates = vec![entry(2, "八", "bā", "восемь"), entry(3, "不", "bù", "нет")];
        let mut rng = StdRng::seed_from_u64(1);
        let options = select_options(&correct, &candidates, Side::Translation, &mut rng);
        assert_eq!(ids(&options), HashSet::from([1, 2, 3]));

        let options = select_options(&correct, &[], Side::Written, &mut rng);
        assert_eq!(options, vec![correct]);
    }

    #[test]
    fn every_entry_gets_a_full_distinct_set() {
        let lexicon = Lexicon::hsk1().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for correct in lexicon.iter() {
            for side in [Side::Written, Side::Phonetic, Side::Translation] {
                let options = select_options(correct, lexicon.entries(), side, &mut rng);
                assert_eq!(options.len(), OPTION_COUNT);
                assert_eq!(ids(&options).len(), OPTION_COUNT);
                assert!(options.contains(correct));
            }
        }
    }

    #[test]
    fn correct_position_is_roughly_uniform() {
        let lexicon = Lexicon::hsk1().unwrap();
        let correct = lexicon.get(1).unwrap().clone();
        let mut rng = StdRng::seed_from_u64(2024);
        let mut slots = [0usize; OPTION_COUNT];
        let runs = 1000;

        for _ in 0..runs {
            let options = select_options(&correct, lexicon.entries(), Side::Phonetic, &mut rng);
            let pos = options.iter().position(|o| o.id == correct.id).unwrap();
            slots[pos] += 1;
        }

        for count in slots {
            let share = count as f64 / runs as f64;
            assert!((0.15..=0.35).contains(&share), "slots: {slots:?}");
        }
    }
}
