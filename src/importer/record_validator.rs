// ==========================================
// 旧版数据迁移引擎 - 记录校验器
// ==========================================
// 流程: 别名解析 → 强制转换 → 必填校验 → 默认值填充
// 规则:
//   - 必填校验在强制转换之后进行（转换为 Null 的必填字段视为缺失）
//   - 按声明顺序报告第一个缺失的必填字段（标识列最先）
//   - 默认值只对转换结果为 Null 的可选字段生效
// ==========================================

use crate::domain::entity::{EntitySpec, FieldSpec};
use crate::domain::record::{RawRecord, Record, Rejection};
use crate::domain::value::CoercedValue;
use crate::importer::field_coercion::coerce;

pub struct RecordValidator;

impl RecordValidator {
    /// 校验单条原始记录
    ///
    /// # 返回
    /// - Ok(Record): 已类型化、已补默认值的记录
    /// - Err(Rejection): 第一个缺失/无法解析的必填字段
    pub fn validate(&self, entity: &EntitySpec, raw: &RawRecord) -> Result<Record, Rejection> {
        let field_count = entity.fields.len() + 1;
        let mut columns = Vec::with_capacity(field_count);
        let mut values = Vec::with_capacity(field_count);

        for field in entity.all_fields() {
            let raw_value = Self::resolve(raw, field);
            let mut value = coerce(field.kind, raw_value);

            if value.is_null() {
                if field.required {
                    return Err(Self::rejection(field, raw_value));
                }
                if let Some(default) = &field.default {
                    value = default.clone();
                }
            }

            columns.push(field.column.clone());
            values.push(value);
        }

        let identity = match values.first() {
            Some(CoercedValue::Integer(id)) => *id,
            // 标识列恒为必填整数，走到这里说明声明被绕过
            _ => return Err(Self::rejection(&entity.identity, None)),
        };

        Ok(Record::new(
            entity.name.clone(),
            raw.row_number(),
            identity,
            columns,
            values,
        ))
    }

    /// 读取源主键原文（用于跳过明细）
    pub fn source_key(&self, entity: &EntitySpec, raw: &RawRecord) -> Option<String> {
        Self::resolve(raw, &entity.identity)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn resolve<'r>(raw: &'r RawRecord, field: &FieldSpec) -> Option<&'r str> {
        raw.resolve(field.lookup_names()).flatten()
    }

    fn rejection(field: &FieldSpec, raw_value: Option<&str>) -> Rejection {
        match raw_value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => Rejection::Malformed {
                field: field.column.clone(),
                value: value.to_string(),
                expected: field.kind,
            },
            None => Rejection::MissingField {
                field: field.column.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value::FieldKind;
    use crate::importer::entity_catalog::EntityCatalog;
    use chrono::NaiveDate;

    fn catalog() -> EntityCatalog {
        EntityCatalog::builtin("ags")
    }

    #[test]
    fn test_revision_record_fully_typed() {
        let catalog = catalog();
        let entity = catalog.get("revision").unwrap();
        let raw = RawRecord::from_pairs(
            1,
            [
                ("adt_key", "10"),
                ("adt_name", "Rev A"),
                ("adt_date", "04/05/22 15:39:11"),
                ("adt_results", "ok"),
                ("adt_dir", "1"),
                ("adt_type", "2"),
                ("adt_AddRA", "true"),
            ],
        );

        let record = RecordValidator.validate(entity, &raw).unwrap();

        assert_eq!(record.identity, 10);
        assert_eq!(
            record.get("adt_date").and_then(|v| v.as_timestamp()),
            NaiveDate::from_ymd_opt(2022, 4, 5).unwrap().and_hms_opt(15, 39, 11)
        );
        assert_eq!(record.get("adt_AddRA"), Some(&CoercedValue::Boolean(true)));
        assert_eq!(record.get("adt_results").and_then(|v| v.as_text()), Some("ok"));
        assert_eq!(record.values().len(), entity.insert_columns().len());
    }

    #[test]
    fn test_aliases_resolve_short_headers() {
        let catalog = catalog();
        let entity = catalog.get("source_sheet").unwrap();
        let raw = RawRecord::from_pairs(
            1,
            [("key", "5"), ("type", "2"), ("num", "3.0"), ("sheet_type", "1")],
        );

        let record = RecordValidator.validate(entity, &raw).unwrap();

        assert_eq!(record.identity, 5);
        assert_eq!(record.get("ft_s_type"), Some(&CoercedValue::Integer(2)));
        assert_eq!(record.get("ft_s_num"), Some(&CoercedValue::Integer(3)));
        assert_eq!(record.get("ft_s_sheet_type"), Some(&CoercedValue::Integer(1)));
    }

    #[test]
    fn test_first_missing_required_field_is_reported() {
        let catalog = catalog();
        let entity = catalog.get("file_record").unwrap();
        // af_name 与 af_type 都缺失，按声明顺序应报告 af_name
        let raw = RawRecord::from_pairs(1, [("af_key", "1"), ("af_dir", "4")]);

        let rejection = RecordValidator.validate(entity, &raw).unwrap_err();

        assert_eq!(
            rejection,
            Rejection::MissingField {
                field: "af_name".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_required_value_is_rejected_after_coercion() {
        let catalog = catalog();
        let entity = catalog.get("file_record").unwrap();
        let raw = RawRecord::from_pairs(
            1,
            [("af_key", "1"), ("af_name", "a.xlsx"), ("af_dir", "abc"), ("af_type", "2")],
        );

        let rejection = RecordValidator.validate(entity, &raw).unwrap_err();

        assert_eq!(
            rejection,
            Rejection::Malformed {
                field: "af_dir".to_string(),
                value: "abc".to_string(),
                expected: FieldKind::Integer,
            }
        );
    }

    #[test]
    fn test_missing_identity_is_rejected() {
        let catalog = catalog();
        let entity = catalog.get("source_type").unwrap();
        let raw = RawRecord::from_pairs(1, [("st_name", "Отчёт")]);

        let rejection = RecordValidator.validate(entity, &raw).unwrap_err();
        assert_eq!(rejection.field(), "st_key");
    }

    #[test]
    fn test_declared_defaults_fill_null_optionals() {
        let catalog = catalog();
        let entity = catalog.get("file_record").unwrap();
        let raw = RawRecord::from_pairs(
            1,
            [("af_key", "1"), ("af_name", "a.xlsx"), ("af_dir", "4"), ("af_type", "2")],
        );

        let record = RecordValidator.validate(entity, &raw).unwrap();

        assert_eq!(record.get("af_execute"), Some(&CoercedValue::Boolean(true)));
        assert_eq!(record.get("af_is_done"), Some(&CoercedValue::Boolean(false)));
        assert_eq!(record.get("af_is_source"), Some(&CoercedValue::Boolean(false)));
        // 无默认值的可选字段保持 Null
        assert_eq!(record.get("af_source"), Some(&CoercedValue::Null));
        assert_eq!(record.get("af_adt_key"), Some(&CoercedValue::Null));
    }

    #[test]
    fn test_explicit_false_overrides_default() {
        let catalog = catalog();
        let entity = catalog.get("file_record").unwrap();
        let raw = RawRecord::from_pairs(
            1,
            [
                ("af_key", "1"),
                ("af_name", "a.xlsx"),
                ("af_dir", "4"),
                ("af_type", "2"),
                ("af_execute", "no"),
            ],
        );

        let record = RecordValidator.validate(entity, &raw).unwrap();
        assert_eq!(record.get("af_execute"), Some(&CoercedValue::Boolean(false)));
    }

    #[test]
    fn test_source_key_reads_alias() {
        let catalog = catalog();
        let entity = catalog.get("source_name").unwrap();
        let raw = RawRecord::from_pairs(1, [("key", " 42 ")]);

        assert_eq!(RecordValidator.source_key(entity, &raw), Some("42".to_string()));
    }
}
