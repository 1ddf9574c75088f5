use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tilevo_engine::{BoardConfig, BoardSeed};
use tilevo_network::Network;

use crate::util;

/// A trained network together with the board it was trained on.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NetworkModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub generations: usize,
    /// Score of the best individual in the last generation.
    pub final_fitness: u32,
    /// Run seed; training again with it reproduces this model.
    pub seed: BoardSeed,
    pub board: BoardConfig,
    pub network: Network,
}

impl NetworkModel {
    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        util::read_json_file("network model", path)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;
    use tilevo_network::Topology;

    use super::*;

    fn model() -> NetworkModel {
        NetworkModel {
            name: "test".to_owned(),
            trained_at: Utc::now(),
            generations: 3,
            final_fitness: 1234,
            seed: BoardSeed::from_bytes([9; 16]),
            board: BoardConfig::default(),
            network: Network::random(Topology::default(), &mut Pcg32::seed_from_u64(1)).unwrap(),
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let model = model();
        let json = serde_json::to_string_pretty(&model).unwrap();
        let restored: NetworkModel = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, model);
    }

    #[test]
    fn test_open_reports_missing_file() {
        let err = NetworkModel::open("/nonexistent/tilevo-model.json").unwrap_err();
        assert!(err.to_string().contains("network model"));
    }

    #[test]
    fn test_open_saved_model() {
        let model = model();
        let path = std::env::temp_dir().join(format!("tilevo-model-{}.json", std::process::id()));
        util::Output::save_json(&model, Some(&path)).unwrap();
        let restored = NetworkModel::open(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(restored, model);
    }
}
