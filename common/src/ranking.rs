//! 売上ランキング集計
//!
//! (分類名称, メニュー名称) ごとに販売金額を合計し、
//! 分類名称の昇順 → 合計金額の降順で並べる。

use crate::time_slot::TimeSlot;
use crate::types::{RankingEntry, TransactionRecord};
use std::collections::BTreeMap;

/// 時間帯別ランキングのうちAIプロンプトに渡す件数
pub const SLOT_PROMPT_TOP_N: usize = 10;
/// 全体ランキングのうちAIプロンプトに渡す件数
pub const OVERALL_PROMPT_TOP_N: usize = 20;

/// ランキングテキストの列名
pub const RANKING_COLUMNS: [&str; 3] = ["分類名称", "メニュー名称", "販売金額(税込)"];

/// 集計済みランキング
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    entries: Vec<RankingEntry>,
}

impl Ranking {
    pub fn entries(&self) -> &[RankingEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankingEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 先頭n件に切り詰めたランキング（並び順は維持）
    pub fn top(&self, n: usize) -> Ranking {
        Ranking {
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }

    /// 全エントリの合計金額
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// AIプロンプト用のテキスト表
    ///
    /// 1行目が列名、以降1行1エントリ。空の場合は「（データなし）」
    pub fn to_prompt_text(&self) -> String {
        if self.entries.is_empty() {
            return "（データなし）".to_string();
        }

        let mut lines = Vec::with_capacity(self.entries.len() + 1);
        lines.push(RANKING_COLUMNS.join(" "));
        for entry in &self.entries {
            lines.push(format!(
                "{} {} {}",
                entry.category,
                entry.item_name,
                format_amount(entry.amount)
            ));
        }
        lines.join("\n")
    }
}

impl<'a> IntoIterator for &'a Ranking {
    type Item = &'a RankingEntry;
    type IntoIter = std::slice::Iter<'a, RankingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// 金額の表示。整数値なら小数点なし
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{:.0}", amount)
    } else {
        format!("{}", amount)
    }
}

/// レコード群をランキングに集計
///
/// グループはキー順（BTreeMap）で作られ、その後の安定ソートで
/// 金額が同じ場合はメニュー名称の昇順になる。
pub fn aggregate<'a, I>(records: I) -> Ranking
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut groups: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    for record in records {
        *groups
            .entry((record.category.as_str(), record.item_name.as_str()))
            .or_insert(0.0) += record.amount;
    }

    let mut entries: Vec<RankingEntry> = groups
        .into_iter()
        .map(|((category, item_name), amount)| RankingEntry {
            category: category.to_string(),
            item_name: item_name.to_string(),
            amount,
        })
        .collect();

    entries.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| b.amount.total_cmp(&a.amount))
    });

    Ranking { entries }
}

/// 指定した時間帯のレコードだけを取り出す
pub fn records_in_slot(
    records: &[TransactionRecord],
    slot: TimeSlot,
) -> impl Iterator<Item = &TransactionRecord> {
    records.iter().filter(move |r| r.time_slot() == slot)
}

/// ランチ・ディナー・全体の3種ランキング
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingSet {
    pub lunch: Ranking,
    pub dinner: Ranking,
    pub overall: Ranking,
}

impl RankingSet {
    pub fn from_records(records: &[TransactionRecord]) -> Self {
        Self {
            lunch: aggregate(records_in_slot(records, TimeSlot::Lunch)),
            dinner: aggregate(records_in_slot(records, TimeSlot::Dinner)),
            overall: aggregate(records),
        }
    }

    /// 時間帯別ランキング（ランチ/ディナー以外は None）
    pub fn for_slot(&self, slot: TimeSlot) -> Option<&Ranking> {
        match slot {
            TimeSlot::Lunch => Some(&self.lunch),
            TimeSlot::Dinner => Some(&self.dinner),
            TimeSlot::Other | TimeSlot::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_slot::Timestamp;
    use std::collections::HashMap;

    fn record_at(hour: u32, category: &str, item: &str, amount: f64) -> TransactionRecord {
        let raw = format!("2025-06-01 {:02}:15:00", hour);
        TransactionRecord::new(Timestamp::parse(&raw), category, item, amount)
    }

    fn entry(category: &str, item: &str, amount: f64) -> RankingEntry {
        RankingEntry {
            category: category.to_string(),
            item_name: item.to_string(),
            amount,
        }
    }

    fn sample_records() -> Vec<TransactionRecord> {
        vec![
            record_at(12, "Drinks", "Beer", 500.0),
            record_at(19, "Drinks", "Beer", 300.0),
            record_at(12, "Food", "Ramen", 900.0),
        ]
    }

    // =============================================
    // aggregate テスト
    // =============================================

    #[test]
    fn test_aggregate_empty() {
        let ranking = aggregate(&Vec::<TransactionRecord>::new());
        assert!(ranking.is_empty());
        assert_eq!(ranking.total(), 0.0);
    }

    #[test]
    fn test_scenario_lunch_dinner_overall() {
        let records = sample_records();
        let set = RankingSet::from_records(&records);

        // 分類名称の昇順（Drinks < Food）
        assert_eq!(
            set.lunch.entries(),
            &[entry("Drinks", "Beer", 500.0), entry("Food", "Ramen", 900.0)]
        );
        assert_eq!(set.dinner.entries(), &[entry("Drinks", "Beer", 300.0)]);
        assert_eq!(
            set.overall.entries(),
            &[entry("Drinks", "Beer", 800.0), entry("Food", "Ramen", 900.0)]
        );
    }

    #[test]
    fn test_sort_category_asc_then_amount_desc() {
        let records = vec![
            record_at(12, "麺類", "ラーメン", 900.0),
            record_at(12, "ドリンク", "烏龍茶", 200.0),
            record_at(12, "麺類", "つけ麺", 1500.0),
            record_at(12, "ドリンク", "生ビール", 600.0),
            record_at(12, "ドリンク", "烏龍茶", 250.0),
        ];
        let ranking = aggregate(&records);

        assert_eq!(
            ranking.entries(),
            &[
                entry("ドリンク", "生ビール", 600.0),
                entry("ドリンク", "烏龍茶", 450.0),
                entry("麺類", "つけ麺", 1500.0),
                entry("麺類", "ラーメン", 900.0),
            ]
        );
    }

    #[test]
    fn test_ties_are_deterministic() {
        let records = vec![
            record_at(12, "サイド", "餃子", 500.0),
            record_at(12, "サイド", "唐揚げ", 500.0),
            record_at(12, "サイド", "枝豆", 500.0),
        ];
        let first = aggregate(&records);

        let mut reversed = records.clone();
        reversed.reverse();
        let second = aggregate(&reversed);

        assert_eq!(first, second);
        assert_eq!(first, aggregate(&records));
        // 同額はメニュー名称の昇順
        let names: Vec<&str> = first.iter().map(|e| e.item_name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_keys_unique_and_total_preserved() {
        let records = vec![
            record_at(9, "定食", "牛たん定食", 1980.0),
            record_at(12, "定食", "牛たん定食", 1980.0),
            record_at(18, "定食", "牛たん定食", 2180.0),
            record_at(18, "一品", "テールスープ", 600.0),
            record_at(23, "一品", "とろろ", 300.0),
            record_at(20, "ドリンク", "ハイボール", -450.0),
        ];
        let ranking = aggregate(&records);

        let mut seen = std::collections::HashSet::new();
        for e in &ranking {
            assert!(seen.insert((e.category.clone(), e.item_name.clone())), "重複キー: {:?}", e);
        }
        assert_eq!(ranking.len(), 4);

        let input_total: f64 = records.iter().map(|r| r.amount).sum();
        assert_eq!(ranking.total(), input_total);
    }

    #[test]
    fn test_negative_amounts_are_summed_as_is() {
        let records = vec![
            record_at(12, "ドリンク", "ハイボール", 450.0),
            record_at(12, "ドリンク", "ハイボール", -450.0),
            record_at(12, "ドリンク", "ハイボール", 450.0),
        ];
        let ranking = aggregate(&records);
        assert_eq!(ranking.entries(), &[entry("ドリンク", "ハイボール", 450.0)]);
    }

    #[test]
    fn test_slot_partition_matches_overall() {
        let mut records = sample_records();
        records.push(record_at(16, "Food", "Ramen", 700.0));
        records.push(record_at(3, "Drinks", "Sake", 1200.0));
        records.push(TransactionRecord::new(Timestamp::parse("壊れた日時"), "Food", "Gyoza", 400.0));
        records.push(TransactionRecord::new(Timestamp::Missing, "Drinks", "Beer", 100.0));

        let mut merged: HashMap<(String, String), f64> = HashMap::new();
        for slot in [TimeSlot::Lunch, TimeSlot::Dinner, TimeSlot::Other, TimeSlot::Unknown] {
            for e in &aggregate(records_in_slot(&records, slot)) {
                *merged
                    .entry((e.category.clone(), e.item_name.clone()))
                    .or_insert(0.0) += e.amount;
            }
        }

        let overall = aggregate(&records);
        assert_eq!(merged.len(), overall.len());
        for e in &overall {
            let key = (e.category.clone(), e.item_name.clone());
            assert_eq!(merged.get(&key), Some(&e.amount), "key = {:?}", key);
        }
    }

    #[test]
    fn test_unparseable_timestamp_only_in_overall() {
        let records = vec![
            record_at(12, "Food", "Ramen", 900.0),
            TransactionRecord::new(Timestamp::parse("not a date"), "Food", "Ramen", 100.0),
        ];
        let set = RankingSet::from_records(&records);

        assert_eq!(set.lunch.entries(), &[entry("Food", "Ramen", 900.0)]);
        assert!(set.dinner.is_empty());
        assert_eq!(set.overall.entries(), &[entry("Food", "Ramen", 1000.0)]);
    }

    // =============================================
    // top / to_prompt_text テスト
    // =============================================

    #[test]
    fn test_top_keeps_order() {
        let records: Vec<TransactionRecord> = (0..30)
            .map(|i| record_at(12, "一品", &format!("メニュー{:02}", i), (i * 10) as f64))
            .collect();
        let ranking = aggregate(&records);

        let top = ranking.top(SLOT_PROMPT_TOP_N);
        assert_eq!(top.len(), 10);
        assert_eq!(top.entries(), &ranking.entries()[..10]);
        assert_eq!(top.entries()[0].item_name, "メニュー29");

        assert_eq!(ranking.top(OVERALL_PROMPT_TOP_N).len(), 20);
        assert_eq!(ranking.top(100).len(), 30);
    }

    #[test]
    fn test_prompt_text() {
        let set = RankingSet::from_records(&sample_records());
        let text = set.overall.to_prompt_text();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "分類名称 メニュー名称 販売金額(税込)");
        assert_eq!(lines[1], "Drinks Beer 800");
        assert_eq!(lines[2], "Food Ramen 900");
    }

    #[test]
    fn test_prompt_text_empty() {
        assert_eq!(Ranking::default().to_prompt_text(), "（データなし）");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1200.0), "1200");
        assert_eq!(format_amount(-450.0), "-450");
        assert_eq!(format_amount(99.5), "99.5");
    }

    #[test]
    fn test_for_slot() {
        let set = RankingSet::from_records(&sample_records());
        assert_eq!(set.for_slot(TimeSlot::Lunch).map(Ranking::len), Some(2));
        assert_eq!(set.for_slot(TimeSlot::Dinner).map(Ranking::len), Some(1));
        assert!(set.for_slot(TimeSlot::Other).is_none());
    }
}
