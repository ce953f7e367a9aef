// ==========================================
// 苗圃育苗排产系统 - 作物与品种实体
// ==========================================
// 职责: 定义作物目录(作物 → 品种)的只读实体
// 红线: 实体为外部系统下发的不可变值对象,本核心不回写
// ==========================================

use serde::{Deserialize, Serialize};

/// 品种 (Subtype)
///
/// 隶属于唯一作物,携带成苗天数与备苗比例的品种级默认值。
/// 槽位可以逐项覆盖这两个默认值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtype {
    /// 品种 ID
    pub subtype_id: String,

    /// 品种名称
    pub name: String,

    /// 默认成苗天数(播种到成苗所需天数)
    pub default_ready_days: Option<i32>,

    /// 默认备苗比例 (0-100, 百分比)
    pub default_buffer_pct: Option<f64>,
}

/// 作物 (Plant)
///
/// 顶层作物目录项。sowing_allowed=false 的作物不参与排产判定。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    /// 作物 ID
    pub plant_id: String,

    /// 作物名称
    pub name: String,

    /// 是否允许排产
    pub sowing_allowed: bool,

    /// 品种列表
    pub subtypes: Vec<Subtype>,
}

impl Plant {
    /// 按品种 ID 查找品种
    pub fn find_subtype(&self, subtype_id: &str) -> Option<&Subtype> {
        self.subtypes.iter().find(|s| s.subtype_id == subtype_id)
    }
}

/// 在目录中定位 (作物, 品种) 对
///
/// 任一缺失返回 None,由调用方转换为 NotFound 错误。
pub fn find_plant_subtype<'a>(
    catalog: &'a [Plant],
    plant_id: &str,
    subtype_id: &str,
) -> Option<(&'a Plant, &'a Subtype)> {
    let plant = catalog.iter().find(|p| p.plant_id == plant_id)?;
    let subtype = plant.find_subtype(subtype_id)?;
    Some((plant, subtype))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Plant> {
        vec![Plant {
            plant_id: "P1".to_string(),
            name: "番茄".to_string(),
            sowing_allowed: true,
            subtypes: vec![Subtype {
                subtype_id: "S1".to_string(),
                name: "樱桃番茄".to_string(),
                default_ready_days: Some(25),
                default_buffer_pct: Some(10.0),
            }],
        }]
    }

    #[test]
    fn test_find_plant_subtype() {
        let catalog = catalog();
        let (plant, subtype) = find_plant_subtype(&catalog, "P1", "S1").unwrap();
        assert_eq!(plant.name, "番茄");
        assert_eq!(subtype.default_ready_days, Some(25));
    }

    #[test]
    fn test_find_plant_subtype_missing() {
        let catalog = catalog();
        assert!(find_plant_subtype(&catalog, "P1", "S9").is_none());
        assert!(find_plant_subtype(&catalog, "P9", "S1").is_none());
    }
}
