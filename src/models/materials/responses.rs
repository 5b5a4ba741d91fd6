use super::entities::StudyMaterial;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialUnit {
    pub unit_title: String,
    pub resources: Vec<StudyMaterial>,
}

/// 按单元分组，保持单元首次出现的顺序
pub fn group_by_unit(materials: Vec<StudyMaterial>) -> Vec<MaterialUnit> {
    let mut units: Vec<MaterialUnit> = Vec::new();
    for material in materials {
        match units
            .iter_mut()
            .find(|u| u.unit_title == material.unit_title)
        {
            Some(unit) => unit.resources.push(material),
            None => units.push(MaterialUnit {
                unit_title: material.unit_title.clone(),
                resources: vec![material],
            }),
        }
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::materials::entities::ResourceType;

    fn material(id: i64, unit: &str) -> StudyMaterial {
        StudyMaterial {
            id,
            subject_id: 1,
            unit_title: unit.to_string(),
            resource_name: format!("res-{id}"),
            resource_type: ResourceType::Pdf,
            resource_url: None,
            uploaded_by: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_group_by_unit_keeps_first_seen_order() {
        let units = group_by_unit(vec![
            material(1, "Unit 2"),
            material(2, "Unit 1"),
            material(3, "Unit 2"),
        ]);
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].unit_title, "Unit 2");
        assert_eq!(units[0].resources.len(), 2);
        assert_eq!(units[1].unit_title, "Unit 1");
    }
}
