use crate::MtmRecord;
use ecm_core::models::{Monthly, MtmReport, SortKey, SortOrder, Summary};
use std::cmp::Ordering;

/// Anything carrying a named monthly mark-to-market.
pub trait Valued {
    /// The name of the contract (or group) valued
    fn name(&self) -> &str;
    /// Mark-to-market per calendar month
    fn monthly(&self) -> &Monthly;
    /// Statistics over the monthly values
    fn summary(&self) -> &Summary;
}

impl<ContractId> Valued for MtmRecord<'_, ContractId> {
    fn name(&self) -> &str {
        self.contract_name()
    }

    fn monthly(&self) -> &Monthly {
        &self.monthly
    }

    fn summary(&self) -> &Summary {
        &self.summary
    }
}

impl<ContractId> Valued for MtmReport<ContractId> {
    fn name(&self) -> &str {
        &self.contract_name
    }

    fn monthly(&self) -> &Monthly {
        &self.monthly
    }

    fn summary(&self) -> &Summary {
        &self.summary
    }
}

/// Sort valuation results in place.
///
/// The sort is stable: records that compare equal keep their relative order.
/// Names compare case-insensitively, falling back to a case-sensitive
/// comparison only to separate names that differ in case alone. Folding case
/// is the only locale-like step: past it, names order by code point, so an
/// accented letter sorts after every unaccented one rather than beside its
/// base letter.
pub fn rank<R: Valued>(records: &mut [R], key: SortKey, order: SortOrder) {
    records.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

fn compare<R: Valued>(a: &R, b: &R, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => compare_names(a.name(), b.name()),
        SortKey::Total => a.summary().total.total_cmp(&b.summary().total),
        SortKey::Average => a.summary().avg.total_cmp(&b.summary().avg),
        SortKey::Volatility => a.summary().volatility.total_cmp(&b.summary().volatility),
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    folded(a).cmp(&folded(b)).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: &str, total: f64) -> MtmReport<u32> {
        MtmReport {
            contract_id: 0,
            contract_name: name.to_owned(),
            monthly: Monthly::splat(total / 12.0),
            summary: Summary {
                total,
                ..Default::default()
            },
        }
    }

    fn names(reports: &[MtmReport<u32>]) -> Vec<&str> {
        reports.iter().map(|r| r.contract_name.as_str()).collect()
    }

    #[test]
    fn names_ignore_case() {
        let mut reports = vec![report("beta", 0.0), report("Alpha", 0.0), report("gamma", 0.0)];
        rank(&mut reports, SortKey::Name, SortOrder::Ascending);
        assert_eq!(names(&reports), ["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn accents_order_by_code_point() {
        let mut reports = vec![report("zeta", 0.0), report("Émile", 0.0), report("emma", 0.0)];
        rank(&mut reports, SortKey::Name, SortOrder::Ascending);
        assert_eq!(names(&reports), ["emma", "zeta", "Émile"]);
    }

    #[test]
    fn descending_totals_keep_ties_stable() {
        let mut reports = vec![
            report("a", 1.0),
            report("b", 5.0),
            report("c", 1.0),
            report("d", -3.0),
        ];
        rank(&mut reports, SortKey::Total, SortOrder::Descending);
        assert_eq!(names(&reports), ["b", "a", "c", "d"]);
    }
}
