#[cfg(test)]
mod tests {
    use crate::cluster::{assign, cluster_means, distances_to_centroids, Init, Kmeans};
    use crate::tree::{
        build_tree, discretize, entropy, information_gain, rank_attributes, root_attribute,
        split_report, RawRow, RawValue, Row, TreeNode,
    };
    use crate::{cluster, Result};

    /// Eight 2-D points, P1..P8.
    fn eight_points() -> Vec<Vec<f64>> {
        vec![
            vec![2.0, 10.0],
            vec![2.0, 5.0],
            vec![8.0, 4.0],
            vec![5.0, 8.0],
            vec![7.0, 5.0],
            vec![6.0, 4.0],
            vec![1.0, 2.0],
            vec![4.0, 9.0],
        ]
    }

    /// m1 = P1, m2 = P4, m3 = P7.
    fn three_seeds() -> Vec<Vec<f64>> {
        vec![vec![2.0, 10.0], vec![5.0, 8.0], vec![1.0, 2.0]]
    }

    #[test]
    fn test_p6_joins_m2() -> Result<()> {
        let points = eight_points();
        let labels = assign(&points, &three_seeds())?;
        assert_eq!(labels[5], 1);

        // d(P6, m2)² = 17 < d(P6, m3)² = 29 < d(P6, m1)² = 52
        let d = distances_to_centroids(&points[5], &three_seeds())?;
        assert!(d[1] < d[2] && d[2] < d[0]);
        assert!((d[1] - 17f64.sqrt()).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_first_assignment_and_update() -> Result<()> {
        let points = eight_points();
        let labels = assign(&points, &three_seeds())?;
        assert_eq!(labels, vec![0, 2, 1, 1, 1, 1, 2, 1]);

        // Cluster around m3 holds P2 and P7.
        let around_m3: Vec<usize> = (0..8).filter(|&i| labels[i] == 2).collect();
        assert_eq!(around_m3, vec![1, 6]);

        let means = cluster_means(&points, &labels, 3)?;
        assert_eq!(means[0], Some(vec![2.0, 10.0]));
        assert_eq!(means[1], Some(vec![6.0, 6.0]));
        assert_eq!(means[2], Some(vec![1.5, 3.5]));

        // One full k-means iteration from the same seeds agrees.
        let fit = cluster(&points, 3, 1, Init::Centroids(three_seeds()))?;
        assert_eq!(fit.labels(), labels);
        assert_eq!(
            fit.centroids(),
            vec![vec![2.0, 10.0], vec![6.0, 6.0], vec![1.5, 3.5]]
        );
        assert_eq!(fit.cluster_sizes(), vec![1, 5, 2]);
        assert!(fit.degenerate().is_empty());
        Ok(())
    }

    #[test]
    fn test_two_centroid_walkthrough() -> Result<()> {
        let points = vec![
            vec![0.1, 0.6],
            vec![0.15, 0.71],
            vec![0.08, 0.9],
            vec![0.16, 0.85],
            vec![0.2, 0.3],
            vec![0.25, 0.5],
            vec![0.24, 0.1],
            vec![0.3, 0.2],
        ];
        let seeds = vec![points[0].clone(), points[7].clone()];

        let fit = Kmeans::new(2)
            .with_iterations(1)
            .with_initial_centroids(seeds)
            .fit(&points)?;

        assert_eq!(fit.labels(), vec![0, 0, 0, 0, 1, 0, 1, 1]);
        assert_eq!(fit.members(1), vec![4, 6, 7]);
        let m2 = &fit.centroids()[1];
        assert!((m2[0] - (0.2 + 0.24 + 0.3) / 3.0).abs() < 1e-12);
        assert!((m2[1] - 0.2).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_k_equals_n_each_point_alone() -> Result<()> {
        let points = eight_points();
        let fit = Kmeans::new(8).with_iterations(1).with_seed(5).fit(&points)?;
        let mut sorted = fit.labels().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..8).collect::<Vec<_>>());
        for (i, &label) in fit.labels().iter().enumerate() {
            assert_eq!(fit.centroids()[label], points[i]);
        }
        Ok(())
    }

    const HEADER: [&str; 5] = ["Age", "Income", "Married", "Health", "Class"];

    /// 15 applicants: 9 "Yes", 6 "No".
    fn health_rows() -> Vec<Row> {
        let data: [[&str; 5]; 15] = [
            ["Young", "High", "No", "Fair", "No"],
            ["Young", "High", "No", "Good", "No"],
            ["Middle", "High", "No", "Fair", "Yes"],
            ["Old", "Medium", "No", "Fair", "Yes"],
            ["Old", "Low", "Yes", "Fair", "Yes"],
            ["Old", "Low", "Yes", "Good", "No"],
            ["Middle", "Low", "Yes", "Good", "Yes"],
            ["Young", "Medium", "No", "Fair", "No"],
            ["Young", "Low", "No", "Fair", "Yes"],
            ["Old", "Medium", "Yes", "Fair", "Yes"],
            ["Young", "Medium", "Yes", "Good", "Yes"],
            ["Middle", "Medium", "Yes", "Good", "Yes"],
            ["Middle", "High", "Yes", "Fair", "Yes"],
            ["Middle", "Medium", "No", "Good", "No"],
            ["Old", "Medium", "No", "Good", "No"],
        ];
        data.iter()
            .map(|cells| {
                HEADER
                    .iter()
                    .zip(cells)
                    .map(|(h, c)| (h.to_string(), c.to_string()))
                    .collect()
            })
            .collect()
    }

    const FEATURES: [&str; 4] = ["Age", "Income", "Married", "Health"];

    #[test]
    fn test_parent_entropy_and_age_gain() -> Result<()> {
        let rows = health_rows();

        let h = entropy(&rows, "Class")?;
        assert_eq!(format!("{h:.4}"), "0.9710");

        let ig = information_gain(&rows, "Age", "Class")?;
        assert!(ig > 0.0);
        assert_eq!(format!("{ig:.4}"), "0.0830");

        let report = split_report(&rows, "Age", "Class")?;
        let values: Vec<&str> = report.partitions.iter().map(|p| p.value.as_str()).collect();
        assert_eq!(values, vec!["Young", "Middle", "Old"]);
        assert!(report.partitions.iter().all(|p| p.count == 5));
        // Middle: 4 Yes / 1 No
        assert_eq!(
            report.partitions[1].class_counts,
            vec![("Yes".to_string(), 4), ("No".to_string(), 1)]
        );
        assert_eq!(format!("{:.4}", report.partitions[1].entropy), "0.7219");
        Ok(())
    }

    #[test]
    fn test_gains_and_root() -> Result<()> {
        let rows = health_rows();
        let gains: Vec<String> = rank_attributes(&rows, &FEATURES, "Class")?
            .iter()
            .map(|s| format!("{}={:.4}", s.attribute, s.gain))
            .collect();
        assert_eq!(
            gains,
            vec!["Age=0.0830", "Income=0.0282", "Married=0.1858", "Health=0.0785"]
        );

        let root = root_attribute(&rows, &FEATURES, "Class")?;
        assert_eq!(root.map(|(a, _)| a).as_deref(), Some("Married"));
        Ok(())
    }

    #[test]
    fn test_health_tree() -> Result<()> {
        let rows = health_rows();
        let tree = build_tree(&rows, &FEATURES, "Class")?;

        let expected = "\
[Married]
  If Married == No:
    [Health]
      If Health == Fair:
        [Age]
          If Age == Middle:
            -> Yes
          If Age == Old:
            -> Yes
          If Age == Young:
            [Income]
              If Income == High:
                -> No
              If Income == Low:
                -> Yes
              If Income == Medium:
                -> No
      If Health == Good:
        -> No
  If Married == Yes:
    [Age]
      If Age == Middle:
        -> Yes
      If Age == Old:
        [Health]
          If Health == Fair:
            -> Yes
          If Health == Good:
            -> No
      If Age == Young:
        -> Yes
";
        assert_eq!(tree.to_string(), expected);

        // Every training row is classified as labelled.
        let predicted = tree.predict_batch(&rows)?;
        let actual: Vec<&str> = rows.iter().map(|r| r["Class"].as_str()).collect();
        assert_eq!(predicted, actual);
        Ok(())
    }

    #[test]
    fn test_tree_is_deterministic() -> Result<()> {
        let rows = health_rows();
        let first = build_tree(&rows, &FEATURES, "Class")?;
        for _ in 0..5 {
            let again = build_tree(&rows, &FEATURES, "Class")?;
            assert_eq!(again, first);
            assert_eq!(again.to_string(), first.to_string());
        }
        Ok(())
    }

    #[test]
    fn test_numeric_pipeline() -> Result<()> {
        let raw: Vec<RawRow> = [
            (19.0, "Low", "No"),
            (20.0, "Low", "No"),
            (25.0, "High", "Yes"),
            (32.0, "Medium", "Yes"),
            (41.0, "High", "Yes"),
            (18.0, "Medium", "No"),
        ]
        .iter()
        .map(|&(age, income, buys)| {
            [
                ("Age".to_string(), RawValue::Number(age)),
                ("Income".to_string(), RawValue::from(income)),
                ("Buys".to_string(), RawValue::from(buys)),
            ]
            .into_iter()
            .collect()
        })
        .collect();

        let data = discretize(&raw)?;
        // sorted ages [18, 19, 20, 25, 32, 41] → upper median 25
        assert_eq!(data.medians["Age"], 25.0);

        let tree = build_tree(&data.rows, &["Age", "Income"], "Buys")?;
        // Income settles Low and High; Medium still needs the age bucket.
        assert_eq!(tree.attribute(), Some("Income"));
        assert_eq!(tree.depth(), 2);
        let predicted = tree.predict_batch(&data.rows)?;
        let actual: Vec<&str> = data.rows.iter().map(|r| r["Buys"].as_str()).collect();
        assert_eq!(predicted, actual);

        let young: Row = [("Age", "<=25"), ("Income", "Low")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(tree.predict(&young)?, "No");
        assert!(matches!(tree, TreeNode::Decision { .. }));
        Ok(())
    }
}
