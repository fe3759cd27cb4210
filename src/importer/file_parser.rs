// ==========================================
// 旧版数据迁移引擎 - 文件解析器实现
// ==========================================
// 输入: 每个实体一个 UTF-8 CSV 导出文件（首行为表头）
// 规则:
//   - 去除首个表头前的 BOM
//   - 表头与单元格去首尾空白；空单元格视为无值
//   - 完全空白的行跳过
//   - 短行: 尾部缺失的列视为不存在
// ==========================================

use crate::config::InputConfig;
use crate::domain::entity::EntitySpec;
use crate::domain::record::RawRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::record_source::{RecordSource, SourceInput};
use csv::ReaderBuilder;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

const UTF8_BOM: char = '\u{feff}';

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    pub fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>> {
        let location = file_path.display().to_string();

        let file = File::open(file_path).map_err(|e| ImportError::FileReadError {
            path: location.clone(),
            message: e.to_string(),
        })?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let csv_error = |e: csv::Error| ImportError::CsvParseError {
            path: location.clone(),
            message: e.to_string(),
        };

        // 读取表头
        let headers: Vec<String> = reader
            .byte_headers()
            .map_err(csv_error)?
            .iter()
            .enumerate()
            .map(|(idx, h)| {
                let header = String::from_utf8_lossy(h);
                let header: &str = if idx == 0 {
                    header.trim_start_matches(UTF8_BOM)
                } else {
                    &header
                };
                header.trim().to_string()
            })
            .collect();

        // 读取所有行
        let mut records = Vec::new();
        for (row_idx, result) in reader.byte_records().enumerate() {
            let row = result.map_err(csv_error)?;
            let mut record = RawRecord::new(row_idx + 1);

            for (header, value) in headers.iter().zip(row.iter()) {
                if header.is_empty() {
                    continue;
                }
                let value = String::from_utf8_lossy(value);
                let value = value.trim();
                record.push(
                    header.clone(),
                    (!value.is_empty()).then(|| value.to_string()),
                );
            }

            // 跳过完全空白的行
            if record.is_blank() {
                continue;
            }

            records.push(record);
        }

        debug!(path = %location, rows = records.len(), "CSV 解析完成");
        Ok(records)
    }
}

// ==========================================
// CsvRecordSource - 导出目录
// ==========================================
// 文件名: 实体声明的 input_file，可按逻辑名覆盖
#[derive(Debug, Clone)]
pub struct CsvRecordSource {
    directory: PathBuf,
    overrides: BTreeMap<String, String>,
}

impl CsvRecordSource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            overrides: BTreeMap::new(),
        }
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self {
            directory: config.directory.clone(),
            overrides: config.files.clone(),
        }
    }

    pub fn with_override(mut self, entity: impl Into<String>, file: impl Into<String>) -> Self {
        self.overrides.insert(entity.into(), file.into());
        self
    }

    pub fn path_for(&self, entity: &EntitySpec) -> PathBuf {
        let file = self
            .overrides
            .get(&entity.name)
            .unwrap_or(&entity.input_file);
        self.directory.join(file)
    }
}

impl RecordSource for CsvRecordSource {
    fn load(&self, entity: &EntitySpec) -> ImportResult<SourceInput> {
        let path = self.path_for(entity);
        let location = path.display().to_string();

        if !path.exists() {
            return Ok(SourceInput::Missing { location });
        }

        let records = CsvParser.parse_to_raw_records(&path)?;
        Ok(SourceInput::Records { location, records })
    }
}
