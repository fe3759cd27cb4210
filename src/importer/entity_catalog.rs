// ==========================================
// 旧版数据迁移引擎 - 实体目录
// ==========================================
// 职责: 汇总全部可导入实体（声明顺序即依赖图的平局顺序）
// 内置目录: 源类型 → 源工作表 → 源名称 → 修订 → 文件记录
// ==========================================

use crate::domain::entity::{EntitySpec, FieldSpec};
use crate::domain::value::CoercedValue;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashSet;

/// 内置目录的默认目标 schema
pub const DEFAULT_SCHEMA: &str = "ags";

#[derive(Debug, Clone, PartialEq)]
pub struct EntityCatalog {
    entities: Vec<EntitySpec>,
}

impl EntityCatalog {
    /// 由声明列表构造；逻辑名不可重复
    pub fn new(entities: Vec<EntitySpec>) -> ImportResult<Self> {
        let mut seen = HashSet::new();
        for entity in &entities {
            if !seen.insert(entity.name.as_str()) {
                return Err(ImportError::DuplicateEntity(entity.name.clone()));
            }
        }
        Ok(Self { entities })
    }

    /// 内置目录（旧版桌面库的五张表）
    pub fn builtin(schema: &str) -> Self {
        Self {
            entities: vec![
                source_type(schema),
                source_sheet(schema),
                source_name(schema),
                revision(schema),
                file_record(schema),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&EntitySpec> {
        self.entities.iter().find(|e| e.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.entities.iter().position(|e| e.name == name)
    }

    /// 按声明顺序
    pub fn entities(&self) -> &[EntitySpec] {
        &self.entities
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

// ==========================================
// 内置实体声明
// ==========================================

fn source_type(schema: &str) -> EntitySpec {
    EntitySpec::new("source_type", "ra_ft_st", "st")
        .label("源类型")
        .schema(schema)
        .identity(FieldSpec::integer("st_key").alias("key"))
        .field(FieldSpec::text("st_name").alias("name").required())
}

fn source_sheet(schema: &str) -> EntitySpec {
    EntitySpec::new("source_sheet", "ra_ft_s", "ft_s")
        .label("源工作表")
        .schema(schema)
        .identity(FieldSpec::integer("ft_s_key").alias("key"))
        .field(FieldSpec::integer("ft_s_type").alias("type").required())
        .field(FieldSpec::integer("ft_s_num").alias("num").required())
        .field(
            FieldSpec::integer("ft_s_sheet_type")
                .alias("sheet_type")
                .required(),
        )
        .depends_on("source_type")
}

fn source_name(schema: &str) -> EntitySpec {
    EntitySpec::new("source_name", "ra_ft_sn", "ftsn")
        .label("源名称")
        .schema(schema)
        .identity(FieldSpec::integer("ftsn_key").alias("key"))
        .field(FieldSpec::integer("ftsn_ft_s").alias("ft_s").required())
        .field(FieldSpec::text("ftsn_name").alias("name").required())
        .depends_on("source_sheet")
}

fn revision(schema: &str) -> EntitySpec {
    EntitySpec::new("revision", "ra_a", "adt")
        .label("修订")
        .schema(schema)
        .identity(FieldSpec::integer("adt_key").alias("key"))
        .field(FieldSpec::text("adt_name").alias("name").required())
        .field(FieldSpec::timestamp("adt_date").alias("date"))
        .field(FieldSpec::text("adt_results").alias("results"))
        .field(FieldSpec::integer("adt_dir").alias("dir").required())
        .field(FieldSpec::integer("adt_type").alias("type").required())
        .field(
            FieldSpec::boolean("adt_AddRA")
                .alias("AddRA")
                .default_value(CoercedValue::Boolean(false)),
        )
}

fn file_record(schema: &str) -> EntitySpec {
    EntitySpec::new("file_record", "ra_f", "af")
        .label("文件记录")
        .schema(schema)
        .identity(FieldSpec::integer("af_key").alias("key"))
        .field(FieldSpec::text("af_name").alias("name").required())
        .field(FieldSpec::integer("af_dir").alias("dir").required())
        .field(FieldSpec::integer("af_type").alias("type").required())
        .field(
            FieldSpec::boolean("af_execute")
                .alias("execute")
                .default_value(CoercedValue::Boolean(true)),
        )
        .field(FieldSpec::boolean("af_source").alias("source"))
        .field(FieldSpec::integer("af_adt_key").alias("adt_key"))
        .field(
            FieldSpec::boolean("af_is_done")
                .alias("is_done")
                .default_value(CoercedValue::Boolean(false)),
        )
        .field(
            FieldSpec::boolean("af_is_source")
                .alias("is_source")
                .default_value(CoercedValue::Boolean(false)),
        )
        .depends_on("revision")
        .required_input()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_declaration_order() {
        let catalog = EntityCatalog::builtin(DEFAULT_SCHEMA);
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(
            names,
            vec!["source_type", "source_sheet", "source_name", "revision", "file_record"]
        );
    }

    #[test]
    fn test_only_file_record_input_is_required() {
        let catalog = EntityCatalog::builtin(DEFAULT_SCHEMA);
        let required: Vec<&str> = catalog
            .entities()
            .iter()
            .filter(|e| e.input_required)
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(required, vec!["file_record"]);
    }

    #[test]
    fn test_builtin_tables_and_files() {
        let catalog = EntityCatalog::builtin("legacy");
        let record = catalog.get("file_record").unwrap();

        assert_eq!(record.schema, "legacy");
        assert_eq!(record.table, "ra_f");
        assert_eq!(record.input_file, "ra_f_export.csv");
        assert_eq!(record.created_column, "af_created");
        assert_eq!(record.depends_on, vec!["revision".to_string()]);

        let sheet = catalog.get("source_sheet").unwrap();
        assert_eq!(sheet.identity.column, "ft_s_key");
        assert_eq!(sheet.updated_column, "ft_s_updated");
    }

    #[test]
    fn test_duplicate_entity_rejected() {
        let err = EntityCatalog::new(vec![
            EntitySpec::new("a", "t_a", "a"),
            EntitySpec::new("a", "t_b", "b"),
        ])
        .unwrap_err();
        assert_eq!(err, ImportError::DuplicateEntity("a".to_string()));
    }
}
