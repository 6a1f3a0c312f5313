#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;
    use argus::callbacks::fires;
    use argus::metrics::{precision_recall_curve, roc_curve, ConfusionMatrix};
    use ndarray::Array1;

    // Strategy for generating scores with binary labels
    fn scored_labels_strategy() -> impl Strategy<Value = (Array1<f32>, Array1<f32>)> {
        prop::collection::vec((0.0f32..=1.0, prop::bool::ANY), 1..200)
            .prop_map(|pairs| {
                let scores = pairs.iter().map(|(s, _)| *s).collect::<Vec<_>>();
                let labels = pairs.iter().map(|(_, l)| *l as u8 as f32).collect::<Vec<_>>();
                (Array1::from_vec(scores), Array1::from_vec(labels))
            })
    }

    // Same, but guaranteed to contain both classes
    fn two_class_strategy() -> impl Strategy<Value = (Array1<f32>, Array1<f32>)> {
        scored_labels_strategy().prop_map(|(scores, mut labels)| {
            let last = labels.len() - 1;
            if labels.iter().all(|&l| l == labels[0]) {
                labels[last] = 1.0 - labels[0];
            }
            (scores, labels)
        }).prop_filter("need two samples", |(s, _)| s.len() >= 2)
    }

    proptest! {
        #[test]
        fn test_fires_iff_positive_multiple(period in 1usize..50, epoch in 0usize..1000) {
            let expected = epoch > 0 && epoch % period == 0;
            prop_assert_eq!(fires(epoch, period), expected);
        }

        #[test]
        fn test_confusion_rows_sum_to_one(
            (scores, labels) in scored_labels_strategy(),
            threshold in 0.0f32..=1.0
        ) {
            let matrix = ConfusionMatrix::from_scores(scores.view(), labels.view(), threshold).unwrap();
            prop_assert_eq!(matrix.total() as usize, labels.len());

            let counts = matrix.counts();
            let normalized = matrix.normalized();
            for row in 0..2 {
                let sum: f64 = normalized.row(row).sum();
                if counts[row].iter().sum::<u64>() > 0 {
                    prop_assert!((sum - 1.0).abs() < 1e-6, "row {} sums to {}", row, sum);
                } else {
                    prop_assert_eq!(sum, 0.0);
                }
            }
        }

        #[test]
        fn test_roc_auc_is_bounded((scores, labels) in two_class_strategy()) {
            let roc = roc_curve(scores.view(), labels.view()).unwrap();
            let area = roc.auc();
            prop_assert!((0.0..=1.0 + 1e-12).contains(&area), "AUC out of range: {}", area);

            // Curve runs from (0, 0) to (1, 1) without going backwards
            prop_assert_eq!((roc.fpr[0], roc.tpr[0]), (0.0, 0.0));
            prop_assert_eq!((*roc.fpr.last().unwrap(), *roc.tpr.last().unwrap()), (1.0, 1.0));
            for w in roc.fpr.windows(2) {
                prop_assert!(w[1] >= w[0]);
            }
            for w in roc.tpr.windows(2) {
                prop_assert!(w[1] >= w[0]);
            }
        }

        #[test]
        fn test_precision_recall_bounds((scores, labels) in two_class_strategy()) {
            let pr = precision_recall_curve(scores.view(), labels.view()).unwrap();
            prop_assert_eq!(pr.precision.len(), pr.recall.len());
            prop_assert_eq!(pr.thresholds.len() + 1, pr.recall.len());
            for (&p, &r) in pr.precision.iter().zip(pr.recall.iter()) {
                prop_assert!((0.0..=1.0).contains(&p));
                prop_assert!((0.0..=1.0).contains(&r));
            }
            let ap = pr.average_precision();
            prop_assert!((0.0..=1.0 + 1e-12).contains(&ap), "AP out of range: {}", ap);
        }
    }
}
