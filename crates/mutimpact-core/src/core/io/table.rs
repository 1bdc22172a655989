use super::error::InputError;
use crate::core::models::features::FeatureRow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Columns of the full feature table, in output order.
pub const FULL_COLUMNS: [&str; 16] = [
    "position",
    "wt",
    "mut",
    "secondary_structure",
    "relative_sasa",
    "buried_flag",
    "entropy",
    "charge_change",
    "hydrophobicity_delta",
    "volume_delta",
    "polarity_change_flag",
    "volume_impact",
    "hydro_impact",
    "conservation_score",
    "stability_score",
    "stability_class",
];

/// Hand-built heuristic labels that must not reach a learned model.
pub const ML_EXCLUDED_COLUMNS: [&str; 2] = ["stability_risk_index", "stability_class"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLayout {
    Full,
    MachineLearning,
}

impl TableLayout {
    pub fn columns(self) -> Vec<&'static str> {
        match self {
            TableLayout::Full => FULL_COLUMNS.to_vec(),
            TableLayout::MachineLearning => FULL_COLUMNS
                .iter()
                .copied()
                .filter(|c| !ML_EXCLUDED_COLUMNS.contains(c))
                .collect(),
        }
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Renders one row's cells for the given columns; nulls become empty strings.
fn cells(row: &FeatureRow, columns: &[&str]) -> Vec<String> {
    let structure = row.structure.as_ref();
    let stability = row.stability.as_ref();
    let chem = &row.chemistry;

    columns
        .iter()
        .map(|&column| match column {
            "position" => row.mutation.position.to_string(),
            "wt" => row.mutation.wt.to_string(),
            "mut" => row.mutation.mutant.to_string(),
            "secondary_structure" => opt(structure.map(|s| s.secondary_structure)),
            "relative_sasa" => opt(structure.map(|s| s.relative_sasa)),
            "buried_flag" => opt(structure.map(|s| s.buried_flag)),
            "entropy" => opt(row.entropy),
            "charge_change" => chem.charge_change.to_string(),
            "hydrophobicity_delta" => chem.hydrophobicity_delta.to_string(),
            "volume_delta" => chem.volume_delta.to_string(),
            "polarity_change_flag" => chem.polarity_change_flag.to_string(),
            "volume_impact" => opt(stability.map(|s| s.volume_impact)),
            "hydro_impact" => opt(stability.map(|s| s.hydro_impact)),
            "conservation_score" => opt(stability.and_then(|s| s.conservation_score)),
            "stability_score" => opt(stability.map(|s| s.stability_score)),
            "stability_class" => opt(stability.map(|s| s.stability_class.label())),
            _ => String::new(),
        })
        .collect()
}

pub fn write_table<W: Write>(
    writer: W,
    rows: &[FeatureRow],
    layout: TableLayout,
) -> Result<(), csv::Error> {
    let columns = layout.columns();
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&columns)?;
    for row in rows {
        wtr.write_record(cells(row, &columns))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_table_to_path(
    path: &Path,
    rows: &[FeatureRow],
    layout: TableLayout,
) -> Result<(), InputError> {
    let file = File::create(path).map_err(|e| InputError::from_io(path, e))?;
    write_table(file, rows, layout).map_err(|e| match e.into_kind() {
        csv::ErrorKind::Io(source) => InputError::from_io(path, source),
        other => InputError::format(path, format!("{other:?}")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::features::{
        ChemistryFeature, StabilityClass, StabilityFeatures, StructuralFeature,
    };
    use crate::core::models::mutation::Mutation;
    use crate::core::models::residue::AminoAcid;

    fn row(with_structure: bool) -> FeatureRow {
        let mutation = Mutation::new(3, AminoAcid::AsparticAcid, AminoAcid::GlutamicAcid);
        FeatureRow {
            mutation,
            structure: with_structure.then(|| StructuralFeature {
                position: 3,
                secondary_structure: 'H',
                relative_sasa: 0.1,
                buried_flag: 1,
            }),
            entropy: None,
            chemistry: ChemistryFeature {
                position: 3,
                wt: mutation.wt,
                mutant: mutation.mutant,
                charge_change: 0.0,
                hydrophobicity_delta: 0.0,
                volume_delta: 27.5,
                polarity_change_flag: 0,
            },
            stability: Some(StabilityFeatures {
                volume_impact: 0.275,
                hydro_impact: 0.0,
                conservation_score: None,
                stability_score: 2.275,
                stability_class: StabilityClass::Moderate,
            }),
        }
    }

    fn render(rows: &[FeatureRow], layout: TableLayout) -> String {
        let mut out = Vec::new();
        write_table(&mut out, rows, layout).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn full_table_has_header_and_one_line_per_row() {
        let text = render(&[row(true), row(false)], TableLayout::Full);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], FULL_COLUMNS.join(","));
        assert_eq!(
            lines[1],
            "3,D,E,H,0.1,1,,0,0,27.5,0,0.275,0,,2.275,Moderate impact"
        );
    }

    #[test]
    fn missing_structure_renders_as_empty_cells() {
        let text = render(&[row(false)], TableLayout::Full);
        let data = text.lines().nth(1).unwrap();
        assert!(data.starts_with("3,D,E,,,,,"));
    }

    #[test]
    fn ml_table_drops_heuristic_label() {
        let columns = TableLayout::MachineLearning.columns();
        assert!(!columns.contains(&"stability_class"));
        assert!(columns.contains(&"stability_score"));
        assert_eq!(columns.len(), FULL_COLUMNS.len() - 1);

        let text = render(&[row(true)], TableLayout::MachineLearning);
        assert!(!text.contains("Moderate impact"));
        assert!(!text.lines().next().unwrap().contains("stability_class"));
    }
}
