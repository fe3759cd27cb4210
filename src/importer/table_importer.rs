// ==========================================
// 旧版数据迁移引擎 - 单表导入器
// ==========================================
// 流程（逐条，顺序执行）:
//   1. 校验 → 拒绝则跳过（不访问存储）
//   2. 工作单元: begin → 开启显式标识 → INSERT → 关闭显式标识 → commit
//   3. 存储端拒绝 → 回滚 → 跳过并记录原因 → 继续下一条
// 红线: 单条失败永不回滚已提交记录
// ==========================================

use crate::domain::entity::EntitySpec;
use crate::domain::outcome::{ImportOutcome, SkipDetail, SkipReason};
use crate::domain::record::RawRecord;
use crate::importer::record_validator::RecordValidator;
use crate::repository::identity_insert::IdentityInsert;
use crate::repository::store_gateway::StoreGateway;
use crate::repository::unit_of_work::run_unit_of_work;
use tracing::{info, instrument, warn};

pub struct TableImporter<'g, G: StoreGateway + ?Sized> {
    gateway: &'g mut G,
    validator: RecordValidator,
}

impl<'g, G: StoreGateway + ?Sized> TableImporter<'g, G> {
    pub fn new(gateway: &'g mut G) -> Self {
        Self {
            gateway,
            validator: RecordValidator,
        }
    }

    /// 导入单个实体的全部原始记录
    ///
    /// # 返回
    /// - ImportOutcome: imported / skipped 计数与每条跳过明细
    #[instrument(skip_all, fields(entity = %entity.name, table = %entity.table, records = records.len()))]
    pub fn import_entity(&mut self, entity: &EntitySpec, records: &[RawRecord]) -> ImportOutcome {
        let statements = IdentityInsert::for_entity(entity, self.gateway.dialect());
        let mut outcome = ImportOutcome::new(entity);

        for raw in records {
            let source_key = self.validator.source_key(entity, raw);

            let record = match self.validator.validate(entity, raw) {
                Ok(record) => record,
                Err(rejection) => {
                    warn!(
                        row = raw.row_number(),
                        key = source_key.as_deref().unwrap_or("-"),
                        reason = %rejection,
                        "✗ 记录校验未通过，跳过"
                    );
                    outcome.record_skip(SkipDetail {
                        row_number: raw.row_number(),
                        source_key,
                        reason: SkipReason::Rejected { rejection },
                    });
                    continue;
                }
            };

            match run_unit_of_work(&mut *self.gateway, |g| statements.insert_record(g, &record)) {
                Ok(()) => {
                    outcome.record_imported();
                    info!(row = record.row_number, key = record.identity, "✓ 已导入");
                }
                Err(err) => {
                    warn!(
                        row = record.row_number,
                        key = record.identity,
                        error = %err,
                        "✗ 存储端拒绝，已回滚"
                    );
                    outcome.record_skip(SkipDetail {
                        row_number: record.row_number,
                        source_key,
                        reason: SkipReason::Store {
                            kind: err.kind(),
                            message: err.to_string(),
                        },
                    });
                }
            }
        }

        info!(
            imported = outcome.imported,
            skipped = outcome.skipped,
            "实体导入完成"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::outcome::StoreRejectionKind;
    use crate::domain::record::Rejection;
    use crate::importer::entity_catalog::EntityCatalog;
    use crate::repository::error::GatewayError;
    use crate::repository::store_gateway::testing::{Call, RecordingGateway};

    fn source_type_rows(keys: &[&str]) -> Vec<RawRecord> {
        keys.iter()
            .enumerate()
            .map(|(idx, key)| RawRecord::from_pairs(idx + 1, [("st_key", *key), ("st_name", "Report")]))
            .collect()
    }

    #[test]
    fn test_each_record_is_its_own_unit_of_work() {
        let catalog = EntityCatalog::builtin("ags");
        let mut gateway = RecordingGateway::new();

        let outcome = TableImporter::new(&mut gateway)
            .import_entity(catalog.get("source_type").unwrap(), &source_type_rows(&["1"]));

        assert_eq!(outcome.imported, 1);
        assert_eq!(gateway.calls.len(), 5);
        assert_eq!(gateway.calls[0], Call::Begin);
        assert_eq!(
            gateway.statements(),
            vec![
                "SET IDENTITY_INSERT ags.ra_ft_st ON",
                "INSERT INTO ags.ra_ft_st (st_key, st_name, st_created, st_updated) \
                 VALUES (?, ?, GETDATE(), GETDATE())",
                "SET IDENTITY_INSERT ags.ra_ft_st OFF",
            ]
        );
        assert_eq!(gateway.calls[4], Call::Commit);
    }

    #[test]
    fn test_malformed_record_in_the_middle_is_isolated() {
        let catalog = EntityCatalog::builtin("ags");
        let mut gateway = RecordingGateway::new();

        let outcome = TableImporter::new(&mut gateway).import_entity(
            catalog.get("source_type").unwrap(),
            &source_type_rows(&["1", "2", "abc", "4", "5"]),
        );

        assert_eq!(outcome.imported, 4);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(gateway.committed.len(), 4);
        let skip = &outcome.skips[0];
        assert_eq!(skip.row_number, 3);
        assert_eq!(skip.source_key.as_deref(), Some("abc"));
        assert!(matches!(
            &skip.reason,
            SkipReason::Rejected { rejection: Rejection::Malformed { field, .. } } if field == "st_key"
        ));
    }

    #[test]
    fn test_rejected_record_never_touches_store() {
        let catalog = EntityCatalog::builtin("ags");
        let mut gateway = RecordingGateway::new();
        let rows = vec![RawRecord::from_pairs(1, [("st_key", "1")])];

        let outcome =
            TableImporter::new(&mut gateway).import_entity(catalog.get("source_type").unwrap(), &rows);

        assert_eq!(outcome.skipped, 1);
        assert!(gateway.calls.is_empty());
    }

    #[test]
    fn test_store_rejection_rolls_back_and_continues() {
        let catalog = EntityCatalog::builtin("ags");
        let mut gateway = RecordingGateway::new()
            .fail_when("2", GatewayError::UniqueConstraintViolation("dup".to_string()));

        let outcome = TableImporter::new(&mut gateway).import_entity(
            catalog.get("source_type").unwrap(),
            &source_type_rows(&["1", "2", "3"]),
        );

        assert_eq!(outcome.imported, 2);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(gateway.committed.len(), 2);
        assert!(gateway.calls.contains(&Call::Rollback));
        assert!(matches!(
            &outcome.skips[0].reason,
            SkipReason::Store { kind: StoreRejectionKind::UniqueViolation, .. }
        ));
        assert!(!gateway.in_transaction());
    }

    #[test]
    fn test_empty_input() {
        let catalog = EntityCatalog::builtin("ags");
        let mut gateway = RecordingGateway::new();

        let outcome = TableImporter::new(&mut gateway).import_entity(catalog.get("revision").unwrap(), &[]);

        assert_eq!(outcome.processed(), 0);
        assert!(gateway.calls.is_empty());
    }
}
