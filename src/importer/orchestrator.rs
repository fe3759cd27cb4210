// ==========================================
// 旧版数据迁移引擎 - 导入编排器
// ==========================================
// 职责: 按依赖图拓扑顺序逐个实体执行 TableImporter，汇总结果
// 规则:
//   - 可选输入缺失 → 空集合（0/0），非错误
//   - 必需输入缺失 → error 日志，0 条，依赖它的实体照常执行
//   - 输入不可读 → error 日志，0 条，记录在实体结果上，继续执行
// ==========================================

use crate::domain::entity::EntitySpec;
use crate::domain::outcome::{ImportOutcome, ImportSummary, InputStatus};
use crate::domain::record::RawRecord;
use crate::importer::dependency_graph::ImportPlan;
use crate::importer::record_source::{RecordSource, SourceInput};
use crate::importer::table_importer::TableImporter;
use crate::repository::store_gateway::StoreGateway;
use chrono::Utc;
use tracing::{error, info, instrument};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct ImportOrchestrator;

impl ImportOrchestrator {
    pub fn new() -> Self {
        Self
    }

    /// 执行一次完整导入
    ///
    /// # 参数
    /// - plan: 已排序的导入计划
    /// - source: 原始记录来源
    /// - gateway: 已连接的存储网关
    #[instrument(skip_all, fields(entities = plan.len()))]
    pub fn run_import<S, G>(&self, plan: &ImportPlan, source: &S, gateway: &mut G) -> ImportSummary
    where
        S: RecordSource + ?Sized,
        G: StoreGateway + ?Sized,
    {
        let run_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        info!(run_id = %run_id, order = ?plan.names(), "开始导入");

        let total = plan.len();
        let mut outcomes = Vec::with_capacity(total);

        for (idx, entity) in plan.steps().iter().enumerate() {
            info!(
                step = idx + 1,
                total,
                entity = %entity.name,
                label = %entity.label,
                "导入实体"
            );

            let (records, input) = Self::load_input(source, entity);
            let outcome = TableImporter::new(&mut *gateway)
                .import_entity(entity, &records)
                .with_input(input);
            outcomes.push(outcome);
        }

        let summary = ImportSummary::new(run_id, started_at, Utc::now(), outcomes);
        info!(
            run_id = %summary.run_id,
            imported = summary.total_imported,
            skipped = summary.total_skipped,
            "导入结束"
        );
        summary
    }

    fn load_input<S>(source: &S, entity: &EntitySpec) -> (Vec<RawRecord>, InputStatus)
    where
        S: RecordSource + ?Sized,
    {
        match source.load(entity) {
            Ok(SourceInput::Records { location, records }) => {
                let rows = records.len();
                info!(location = %location, rows, "已读取输入");
                (records, InputStatus::Loaded { location, rows })
            }
            Ok(SourceInput::Missing { location }) => {
                if entity.input_required {
                    error!(entity = %entity.name, location = %location, "必需的输入文件不存在");
                } else {
                    info!(entity = %entity.name, location = %location, "无输入文件，按空集合处理");
                }
                (
                    Vec::new(),
                    InputStatus::Missing {
                        location,
                        required: entity.input_required,
                    },
                )
            }
            Err(err) => {
                error!(entity = %entity.name, error = %err, "输入文件不可读");
                let location = err.path().unwrap_or(&entity.input_file).to_string();
                (
                    Vec::new(),
                    InputStatus::Unreadable {
                        location,
                        error: err.to_string(),
                    },
                )
            }
        }
    }
}

/// 汇总中某实体的输入是否为缺失的必需输入
pub fn missing_required_input(outcome: &ImportOutcome) -> bool {
    matches!(outcome.input, Some(InputStatus::Missing { required: true, .. }))
}
