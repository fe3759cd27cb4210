// ==========================================
// 旧版数据迁移引擎 - 实体依赖图
// ==========================================
// 算法: Kahn 拓扑排序
// 平局: 多个实体同时就绪时，按目录声明顺序
// 红线: 环 / 未知依赖在连接存储之前即报错
// ==========================================

use crate::domain::entity::EntitySpec;
use crate::importer::entity_catalog::EntityCatalog;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::BTreeSet;

/// 已排序的导入计划
#[derive(Debug, Clone, PartialEq)]
pub struct ImportPlan {
    steps: Vec<EntitySpec>,
}

impl ImportPlan {
    pub fn from_catalog(catalog: &EntityCatalog) -> ImportResult<Self> {
        let entities = catalog.entities();
        let count = entities.len();

        // dependents[a] = 依赖 a 的实体下标
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); count];
        let mut in_degree = vec![0usize; count];

        for (idx, entity) in entities.iter().enumerate() {
            // 同一依赖重复声明只计一次
            let deps: BTreeSet<usize> = entity
                .depends_on
                .iter()
                .map(|dep| {
                    catalog
                        .position(dep)
                        .ok_or_else(|| ImportError::UnknownDependency {
                            entity: entity.name.clone(),
                            dependency: dep.clone(),
                        })
                })
                .collect::<ImportResult<_>>()?;

            for dep in deps {
                dependents[dep].push(idx);
                in_degree[idx] += 1;
            }
        }

        let mut ready: BTreeSet<usize> = (0..count).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(count);

        while let Some(next) = ready.pop_first() {
            order.push(next);
            for &dependent in &dependents[next] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.insert(dependent);
                }
            }
        }

        if order.len() < count {
            let entities_in_cycle = (0..count)
                .filter(|&i| in_degree[i] > 0)
                .map(|i| entities[i].name.clone())
                .collect();
            return Err(ImportError::DependencyCycle {
                entities: entities_in_cycle,
            });
        }

        Ok(Self {
            steps: order.into_iter().map(|i| entities[i].clone()).collect(),
        })
    }

    pub fn steps(&self) -> &[EntitySpec] {
        &self.steps
    }

    pub fn names(&self) -> Vec<&str> {
        self.steps.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
