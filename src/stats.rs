//! Descriptive statistics over the loaded record set.
//!
//! Every function here is pure and fails with [`StatsError`] instead of
//! returning `NaN`, so nothing undefined reaches a chart or label.

use crate::config::DashboardConfig;
use crate::data::model::{CategoryField, NumericField, StudentDataset, StudentRecord};
use crate::error::StatsError;

/// Variance terms at or below this fraction of `nΣx²` count as zero.
const ZERO_VARIANCE_TOLERANCE: f64 = 1e-12;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Mean of a metric over one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAverage {
    pub group: String,
    /// Rounded to two decimals; exactly `0.0` for an empty group.
    pub average: f64,
}

/// Correlation of one attribute with the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correlation {
    pub attribute: NumericField,
    /// `None` when the attribute (or the target) has no variance, or its
    /// sums overflow.
    pub coefficient: Option<f64>,
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        // beyond 1e306 there are no fractional digits left to round
        return value;
    }
    scaled.round() / 100.0
}

fn finite(value: f64) -> Result<f64, StatsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StatsError::NonFinite)
    }
}

fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), x| (sum + x, count + 1));
    if count == 0 {
        return None;
    }
    Some(sum / count as f64)
}

/// The record with the highest assessment score.
///
/// Ties go to the record that comes first.
pub fn top_performer(records: &[StudentRecord]) -> Result<&StudentRecord, StatsError> {
    let (first, rest) = records.split_first().ok_or(StatsError::EmptyInput)?;
    Ok(rest.iter().fold(first, |best, rec| {
        if rec.assessment_score > best.assessment_score {
            rec
        } else {
            best
        }
    }))
}

/// Mean of `metric` per group, one entry per value of `group_values` in that
/// order.
pub fn average_by_group<S: AsRef<str>>(
    records: &[StudentRecord],
    group_key: CategoryField,
    group_values: &[S],
    metric: NumericField,
) -> Result<Vec<GroupAverage>, StatsError> {
    if records.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    group_values
        .iter()
        .map(|group| {
            let group = group.as_ref();
            let average = mean(
                records
                    .iter()
                    .filter(|rec| group_key.value(rec) == group)
                    .map(|rec| metric.value(rec)),
            )
            .map_or(Ok(0.0), |avg| finite(round2(avg)))?;
            Ok(GroupAverage {
                group: group.to_string(),
                average,
            })
        })
        .collect()
}

/// Mean of `attribute` over all records, rounded to two decimals.
pub fn average_of(records: &[StudentRecord], attribute: NumericField) -> Result<f64, StatsError> {
    let avg = mean(records.iter().map(|rec| attribute.value(rec))).ok_or(StatsError::EmptyInput)?;
    finite(round2(avg))
}

/// [`average_of`] for each attribute, in order.
pub fn skill_averages(
    records: &[StudentRecord],
    attributes: &[NumericField],
) -> Result<Vec<(NumericField, f64)>, StatsError> {
    attributes
        .iter()
        .map(|&attr| Ok((attr, average_of(records, attr)?)))
        .collect()
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// Pearson correlation coefficient of two paired sequences.
///
/// Uses the sum formula
/// `(nΣxy − ΣxΣy) / sqrt((nΣx² − (Σx)²)(nΣy² − (Σy)²))`
/// and clamps the result to `[-1, 1]`.
///
/// # Errors
///
/// * [`StatsError::EmptyInput`] – both sequences are empty
/// * [`StatsError::LengthMismatch`] – the sequences differ in length
/// * [`StatsError::UndefinedCorrelation`] – fewer than two pairs, or either
///   sequence is constant
/// * [`StatsError::NonFinite`] – the sums overflow
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Result<f64, StatsError> {
    if xs.len() != ys.len() {
        return Err(StatsError::LengthMismatch {
            left: xs.len(),
            right: ys.len(),
        });
    }
    if xs.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    if xs.len() < 2 {
        return Err(StatsError::UndefinedCorrelation);
    }

    let n = xs.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2, mut sum_y2) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for (&x, &y) in xs.iter().zip(ys) {
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
        sum_y2 += y * y;
    }

    let var_x = finite(n * sum_x2 - sum_x * sum_x)?;
    let var_y = finite(n * sum_y2 - sum_y * sum_y)?;
    if var_x <= ZERO_VARIANCE_TOLERANCE * n * sum_x2 || var_y <= ZERO_VARIANCE_TOLERANCE * n * sum_y2 {
        return Err(StatsError::UndefinedCorrelation);
    }

    let r = finite((n * sum_xy - sum_x * sum_y) / (var_x.sqrt() * var_y.sqrt()))?;
    Ok(r.clamp(-1.0, 1.0))
}

/// Correlation of every attribute with `target`, in attribute order.
pub fn correlations(
    records: &[StudentRecord],
    attributes: &[NumericField],
    target: NumericField,
) -> Result<Vec<Correlation>, StatsError> {
    if records.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let ys: Vec<f64> = records.iter().map(|rec| target.value(rec)).collect();
    attributes
        .iter()
        .map(|&attribute| {
            let xs: Vec<f64> = records.iter().map(|rec| attribute.value(rec)).collect();
            let coefficient = match pearson_correlation(&xs, &ys) {
                Ok(r) => Some(r),
                Err(StatsError::UndefinedCorrelation | StatsError::NonFinite) => None,
                Err(e) => return Err(e),
            };
            Ok(Correlation {
                attribute,
                coefficient,
            })
        })
        .collect()
}

/// The attribute with the largest absolute coefficient; the earliest one wins
/// a tie. Undefined correlations are skipped.
pub fn strongest(correlations: &[Correlation]) -> Option<NumericField> {
    let mut best: Option<(NumericField, f64)> = None;
    for corr in correlations {
        let Some(r) = corr.coefficient else {
            continue;
        };
        if best.map_or(true, |(_, best_r)| r.abs() > best_r.abs()) {
            best = Some((corr.attribute, r));
        }
    }
    best.map(|(attribute, _)| attribute)
}

/// The attribute whose values correlate most strongly with `target`.
pub fn most_correlated_attribute(
    records: &[StudentRecord],
    attributes: &[NumericField],
    target: NumericField,
) -> Result<NumericField, StatsError> {
    strongest(&correlations(records, attributes, target)?).ok_or(StatsError::UndefinedCorrelation)
}

// ---------------------------------------------------------------------------
// Insights – everything the dashboard shows for one dataset
// ---------------------------------------------------------------------------

/// Aggregates computed once per loaded dataset and read by the UI every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Insights {
    pub top_performer: StudentRecord,
    pub class_averages: Vec<GroupAverage>,
    pub correlations: Vec<Correlation>,
    /// `None` when no predictor has a defined correlation.
    pub top_skill: Option<NumericField>,
    pub skill_averages: Vec<(NumericField, f64)>,
}

impl Insights {
    pub fn compute(dataset: &StudentDataset, config: &DashboardConfig) -> Result<Self, StatsError> {
        let records = dataset.records();
        let top_performer = top_performer(records)?.clone();
        let class_averages = average_by_group(
            records,
            CategoryField::Class,
            config.classes.as_slice(),
            NumericField::TARGET,
        )?;
        let correlations = correlations(records, &config.predictors, NumericField::TARGET)?;
        let top_skill = match most_correlated_attribute(records, &config.predictors, NumericField::TARGET) {
            Ok(field) => Some(field),
            Err(StatsError::UndefinedCorrelation) => {
                log::warn!("No predictor varies together with the score; correlations are undefined");
                None
            }
            Err(e) => return Err(e),
        };
        let skill_averages = skill_averages(records, &config.predictors)?;

        Ok(Insights {
            top_performer,
            class_averages,
            correlations,
            top_skill,
            skill_averages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::student;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn top_performer_prefers_first_of_ties() {
        let records = vec![
            student(1, "Amy", "A", 80.0, 1.0),
            student(2, "Bo", "B", 95.0, 1.0),
            student(3, "Cy", "C", 95.0, 1.0),
        ];
        assert_eq!(top_performer(&records).unwrap().name, "Bo");
    }

    #[test]
    fn top_performer_beats_every_other_score() {
        let scores = [55.0, 71.5, 99.25, 12.0, 99.0, 64.0];
        let records: Vec<_> = scores
            .iter()
            .enumerate()
            .map(|(i, &s)| student(i as u64, "S", "A", s, 1.0))
            .collect();
        let top = top_performer(&records).unwrap();
        assert!(records.iter().all(|r| top.assessment_score >= r.assessment_score));
        assert_eq!(top.student_id, 2);
    }

    #[test]
    fn top_performer_of_nothing_fails() {
        assert_eq!(top_performer(&[]), Err(StatsError::EmptyInput));
    }

    #[test]
    fn group_average_fills_missing_groups_with_zero() {
        let records = vec![student(1, "Amy", "A", 70.0, 1.0), student(2, "Bo", "A", 80.0, 1.0)];
        let averages =
            average_by_group(&records, CategoryField::Class, &["A", "B", "C"], NumericField::TARGET).unwrap();
        let pairs: Vec<(&str, f64)> = averages.iter().map(|g| (g.group.as_str(), g.average)).collect();
        assert_eq!(pairs, vec![("A", 75.0), ("B", 0.0), ("C", 0.0)]);
    }

    #[test]
    fn group_average_rounds_to_two_decimals() {
        let records = vec![
            student(1, "Amy", "B", 1.0, 1.0),
            student(2, "Bo", "B", 2.0, 1.0),
            student(3, "Cy", "B", 2.0, 1.0),
            student(4, "Di", "C", 90.0, 1.0),
        ];
        let averages =
            average_by_group(&records, CategoryField::Class, &["B", "C"], NumericField::TARGET).unwrap();
        assert_close(averages[0].average, 1.67);
        assert_close(averages[1].average, 90.0);
    }

    #[test]
    fn group_average_of_nothing_fails() {
        let result = average_by_group(&[], CategoryField::Class, &["A"], NumericField::TARGET);
        assert_eq!(result, Err(StatsError::EmptyInput));
    }

    #[test]
    fn pearson_matches_hand_computation() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [2.0, 4.0, 5.0, 4.0, 5.0];
        // 30 / sqrt(50 * 30)
        assert_close(pearson_correlation(&xs, &ys).unwrap(), 30.0 / 1500f64.sqrt());
    }

    #[test]
    fn pearson_is_symmetric() {
        let xs = [3.2, 1.5, 8.8, 4.1, 6.0, 2.7];
        let ys = [60.0, 48.5, 91.0, 70.0, 77.5, 52.0];
        assert_eq!(
            pearson_correlation(&xs, &ys).unwrap(),
            pearson_correlation(&ys, &xs).unwrap()
        );
    }

    #[test]
    fn pearson_of_sequence_with_itself_is_one() {
        let xs = [0.3, 7.1, 2.2, 9.9, 4.4];
        assert_close(pearson_correlation(&xs, &xs).unwrap(), 1.0);
        let negated: Vec<f64> = xs.iter().map(|x| -2.0 * x + 1.0).collect();
        assert_close(pearson_correlation(&xs, &negated).unwrap(), -1.0);
    }

    #[test]
    fn pearson_rejects_constant_input() {
        let xs = [0.1, 0.1, 0.1, 0.1];
        let ys = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(pearson_correlation(&xs, &ys), Err(StatsError::UndefinedCorrelation));
        assert_eq!(pearson_correlation(&ys, &xs), Err(StatsError::UndefinedCorrelation));
        assert_eq!(
            pearson_correlation(&[0.0, 0.0], &[1.0, 2.0]),
            Err(StatsError::UndefinedCorrelation)
        );
    }

    #[test]
    fn pearson_rejects_bad_shapes() {
        assert_eq!(pearson_correlation(&[], &[]), Err(StatsError::EmptyInput));
        assert_eq!(
            pearson_correlation(&[1.0], &[2.0]),
            Err(StatsError::UndefinedCorrelation)
        );
        assert_eq!(
            pearson_correlation(&[1.0, 2.0], &[1.0]),
            Err(StatsError::LengthMismatch { left: 2, right: 1 })
        );
    }

    #[test]
    fn pearson_rejects_overflowing_sums() {
        let xs = [1e200, 2e200, 3e200];
        let ys = [1.0, 2.0, 4.0];
        assert_eq!(pearson_correlation(&xs, &ys), Err(StatsError::NonFinite));
        assert_eq!(pearson_correlation(&ys, &xs), Err(StatsError::NonFinite));
    }

    #[test]
    fn pearson_survives_large_variances() {
        // each variance term is finite but their product is not
        let xs = [1e150, 2e150, 3e150];
        let ys = [2e150, 4e150, 6e150];
        assert_close(pearson_correlation(&xs, &ys).unwrap(), 1.0);
    }

    #[test]
    fn round2_leaves_huge_values_alone() {
        assert_eq!(round2(1e307), 1e307);
        assert_eq!(round2(-1e307), -1e307);
    }

    fn varied_records() -> Vec<StudentRecord> {
        // attention tracks the score, focus runs against it, retention is flat
        [(1, 60.0, 2.0, 9.0), (2, 70.0, 4.0, 6.0), (3, 85.0, 7.0, 5.0), (4, 95.0, 9.0, 1.0)]
            .into_iter()
            .map(|(id, score, attention, focus)| {
                let mut rec = student(id, "S", "A", score, 5.0);
                rec.attention = attention;
                rec.focus = focus;
                rec.comprehension = [3.0, 1.0, 4.0, 2.0][id as usize - 1];
                rec
            })
            .collect()
    }

    #[test]
    fn correlations_mark_flat_attributes_undefined() {
        let records = varied_records();
        let corr = correlations(&records, &NumericField::PREDICTORS, NumericField::TARGET).unwrap();
        let by_attr = |a: NumericField| corr.iter().find(|c| c.attribute == a).unwrap().coefficient;
        assert!(by_attr(NumericField::Attention).unwrap() > 0.9);
        assert!(by_attr(NumericField::Focus).unwrap() < -0.9);
        assert_eq!(by_attr(NumericField::Retention), None);
        assert_eq!(by_attr(NumericField::EngagementTime), None);
        assert_eq!(
            corr.iter().map(|c| c.attribute).collect::<Vec<_>>(),
            NumericField::PREDICTORS.to_vec()
        );
    }

    #[test]
    fn most_correlated_uses_absolute_value() {
        let mut records = varied_records();
        // focus becomes a perfect negative predictor, attention a weaker one
        for (rec, attention) in records.iter_mut().zip([2.0, 7.0, 4.0, 9.0]) {
            rec.focus = 200.0 - rec.assessment_score;
            rec.attention = attention;
        }
        let top = most_correlated_attribute(&records, &NumericField::PREDICTORS, NumericField::TARGET);
        assert_eq!(top, Ok(NumericField::Focus));
    }

    #[test]
    fn most_correlated_tie_goes_to_first_listed() {
        let records: Vec<_> = [(1, 50.0, 1.0), (2, 70.0, 3.0), (3, 65.0, 2.0)]
            .into_iter()
            .map(|(id, score, skill)| student(id, "S", "A", score, skill))
            .collect();
        let order = [NumericField::Retention, NumericField::Comprehension];
        assert_eq!(
            most_correlated_attribute(&records, &order, NumericField::TARGET),
            Ok(NumericField::Retention)
        );
        assert_eq!(
            most_correlated_attribute(&records, &NumericField::PREDICTORS, NumericField::TARGET),
            Ok(NumericField::Comprehension)
        );
    }

    #[test]
    fn most_correlated_fails_when_nothing_varies() {
        let records = vec![student(1, "A", "A", 50.0, 2.0), student(2, "B", "A", 60.0, 2.0)];
        assert_eq!(
            most_correlated_attribute(&records, &NumericField::PREDICTORS, NumericField::TARGET),
            Err(StatsError::UndefinedCorrelation)
        );
        assert_eq!(
            most_correlated_attribute(&[], &NumericField::PREDICTORS, NumericField::TARGET),
            Err(StatsError::EmptyInput)
        );
    }

    #[test]
    fn average_of_rounds_and_rejects_empty() {
        let records = vec![student(1, "A", "A", 70.0, 1.0), student(2, "B", "A", 80.5, 2.0)];
        assert_close(average_of(&records, NumericField::Focus).unwrap(), 1.5);
        assert_close(average_of(&records, NumericField::AssessmentScore).unwrap(), 75.25);
        assert_eq!(average_of(&[], NumericField::Focus), Err(StatsError::EmptyInput));
    }

    #[test]
    fn averages_reject_overflow() {
        let mut records = vec![student(1, "A", "A", 1e308, 1.0), student(2, "B", "A", 1e308, 1.0)];
        records[0].engagement_time = 1e308;
        records[1].engagement_time = 1e308;
        assert_eq!(
            average_of(&records, NumericField::EngagementTime),
            Err(StatsError::NonFinite)
        );
        assert_eq!(
            average_by_group(&records, CategoryField::Class, &["A", "B"], NumericField::TARGET),
            Err(StatsError::NonFinite)
        );
    }

    #[test]
    fn correlations_mark_overflowing_attributes_undefined() {
        let mut records = varied_records();
        for (rec, time) in records.iter_mut().zip([1e200, 2e200, 3e200, 4e200]) {
            rec.engagement_time = time;
        }
        let corr = correlations(&records, &NumericField::PREDICTORS, NumericField::TARGET).unwrap();
        assert_eq!(corr[4].attribute, NumericField::EngagementTime);
        assert_eq!(corr[4].coefficient, None);
        assert!(corr.iter().all(|c| c.coefficient.map_or(true, f64::is_finite)));
    }

    #[test]
    fn insights_bundle_every_aggregate() {
        let dataset = StudentDataset::from_records(varied_records()).unwrap();
        let insights = Insights::compute(&dataset, &DashboardConfig::default()).unwrap();
        assert_eq!(insights.top_performer.student_id, 4);
        assert_eq!(insights.class_averages.len(), 3);
        assert_close(insights.class_averages[0].average, 77.5);
        assert_eq!(insights.class_averages[1].average, 0.0);
        assert_eq!(insights.top_skill, Some(NumericField::Attention));
        assert_eq!(insights.skill_averages.len(), 5);
        assert_close(insights.skill_averages[1].1, 5.5);
    }

    #[test]
    fn insights_require_records() {
        let dataset = StudentDataset::default();
        assert_eq!(
            Insights::compute(&dataset, &DashboardConfig::default()),
            Err(StatsError::EmptyInput)
        );
    }

    #[test]
    fn insights_without_defined_correlation_have_no_top_skill() {
        let records = vec![student(1, "Amy", "A", 50.0, 2.0), student(2, "Bo", "B", 60.0, 2.0)];
        let dataset = StudentDataset::from_records(records).unwrap();
        let insights = Insights::compute(&dataset, &DashboardConfig::default()).unwrap();
        assert_eq!(insights.top_skill, None);
        assert_eq!(insights.correlations.len(), 5);
        assert!(insights.correlations.iter().all(|c| c.coefficient.is_none()));
        assert_eq!(insights.top_performer.name, "Bo");
    }
}
