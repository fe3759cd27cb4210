// ==========================================
// 旧版数据迁移引擎 - 可导入实体定义
// ==========================================
// 职责: 声明式描述一张待迁移表
//   - 标识列（保留源主键）
//   - 字段: 列名 / 别名 / 类型 / 必填 / 默认值
//   - 审计列（由存储端写入当前时间）
//   - 依赖（外键指向的实体）
//   - 输入文件
// 红线: 别名与默认值只在此声明，不在调用处硬编码
// ==========================================

use crate::domain::value::{CoercedValue, FieldKind};

// ==========================================
// FieldSpec - 字段声明
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub column: String,
    pub aliases: Vec<String>,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<CoercedValue>,
}

impl FieldSpec {
    pub fn new(column: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            column: column.into(),
            aliases: Vec::new(),
            kind,
            required: false,
            default: None,
        }
    }

    pub fn integer(column: impl Into<String>) -> Self {
        Self::new(column, FieldKind::Integer)
    }

    pub fn text(column: impl Into<String>) -> Self {
        Self::new(column, FieldKind::Text)
    }

    pub fn timestamp(column: impl Into<String>) -> Self {
        Self::new(column, FieldKind::Timestamp)
    }

    pub fn boolean(column: impl Into<String>) -> Self {
        Self::new(column, FieldKind::Boolean)
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: CoercedValue) -> Self {
        self.default = Some(value);
        self
    }

    /// 查找顺序: 列名本身，然后依次为别名
    pub fn lookup_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.column.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

// ==========================================
// EntitySpec - 实体声明
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpec {
    /// 逻辑名（依赖声明使用）
    pub name: String,
    /// 日志展示用名称
    pub label: String,
    pub schema: String,
    pub table: String,
    pub identity: FieldSpec,
    pub fields: Vec<FieldSpec>,
    pub created_column: String,
    pub updated_column: String,
    pub depends_on: Vec<String>,
    pub input_file: String,
    /// 主实体: 输入缺失时按错误级别记录
    pub input_required: bool,
}

impl EntitySpec {
    /// 创建实体声明
    ///
    /// 默认值:
    /// - 标识列 `<prefix>_key`，审计列 `<prefix>_created` / `<prefix>_updated`
    /// - 输入文件 `<table>_export.csv`
    pub fn new(name: impl Into<String>, table: impl Into<String>, prefix: &str) -> Self {
        let name = name.into();
        let table = table.into();
        Self {
            label: name.clone(),
            name,
            schema: String::new(),
            input_file: format!("{}_export.csv", table),
            table,
            identity: FieldSpec::integer(format!("{}_key", prefix)).required(),
            fields: Vec::new(),
            created_column: format!("{}_created", prefix),
            updated_column: format!("{}_updated", prefix),
            depends_on: Vec::new(),
            input_required: false,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// 覆盖标识列声明（始终为必填整数）
    pub fn identity(mut self, identity: FieldSpec) -> Self {
        self.identity = FieldSpec {
            kind: FieldKind::Integer,
            required: true,
            default: None,
            ..identity
        };
        self
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn depends_on(mut self, entity: impl Into<String>) -> Self {
        self.depends_on.push(entity.into());
        self
    }

    pub fn required_input(mut self) -> Self {
        self.input_required = true;
        self
    }

    /// 全部字段（标识列在首位）
    pub fn all_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        std::iter::once(&self.identity).chain(self.fields.iter())
    }

    /// 插入列（不含审计列）
    pub fn insert_columns(&self) -> Vec<&str> {
        self.all_fields().map(|f| f.column.as_str()).collect()
    }
}
