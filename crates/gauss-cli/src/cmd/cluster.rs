use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use gauss_core::config::ClusterConfig;
use gauss_core::fingerprint::features_id_hex;
use gauss_core::partition::Group;
use gauss_core::{recursive_partition, Point, PointSet};

use crate::cmd::Inputs;
use crate::io::dataset;

#[derive(Args, Debug)]
pub struct ClusterArgs {
    /// Labeled CSV dataset (f1,...,fD,label per line)
    #[arg(long)]
    pub r#in: PathBuf,

    /// Stop after this many groups; the last one is the unsplit remainder.
    /// Omit to peel until one point is left.
    #[arg(long)]
    pub max_groups: Option<usize>,
}

impl ClusterArgs {
    pub fn config(&self) -> ClusterConfig {
        ClusterConfig {
            max_groups: self.max_groups,
        }
    }

    pub fn inputs(&self) -> Inputs {
        Inputs {
            dataset: Some(self.r#in.clone()),
            ..Inputs::default()
        }
    }
}

pub fn run(cfg: &ClusterConfig, inputs: &Inputs) -> anyhow::Result<()> {
    let Some(path) = inputs.dataset.as_deref() else {
        anyhow::bail!("cluster needs a dataset (--in)");
    };
    let records = dataset::load_csv(path)?;

    let rows: Vec<&[f64]> = records.iter().map(|r| r.features.as_slice()).collect();
    eprintln!("file        = {}", path.display());
    eprintln!("records     = {}", records.len());
    eprintln!("features    = {}", records[0].features.len());
    eprintln!("dataset_id  = {}", features_id_hex(&rows));

    let set = PointSet::labeled(
        records
            .into_iter()
            .map(|r| (Point::new(r.features), Some(r.label)))
            .collect(),
    )?;
    let groups = recursive_partition(set, cfg.max_groups)?;

    for (i, g) in groups.iter().enumerate() {
        match g.gap {
            Some(gap) => println!("group {} size={} gap={:.6}", i, g.len(), gap),
            None => println!("group {} size={} terminal", i, g.len()),
        }
        for p in &g.points {
            println!(
                "{} {:.9} {:?}",
                p.label.as_deref().unwrap_or("-"),
                p.score,
                p.point.features()
            );
        }
    }

    eprintln!("--- groups ---");
    for (i, g) in groups.iter().enumerate() {
        eprintln!("group {:>2}: {}", i, label_summary(g));
    }

    Ok(())
}

/// `label=count` pairs, most frequent first.
fn label_summary(g: &Group) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for p in &g.points {
        *counts.entry(p.label.as_deref().unwrap_or("-")).or_default() += 1;
    }
    let mut rows: Vec<(&str, usize)> = counts.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    rows.iter()
        .map(|(l, c)| format!("{}={}", l, c))
        .collect::<Vec<_>>()
        .join(" ")
}
