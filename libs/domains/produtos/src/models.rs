use rust_decimal::Decimal;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::{ProdutoError, ProdutoResult};

/// Catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Produto {
    pub id: i32,
    pub descricao: String,
    #[schema(value_type = String, example = "4.250")]
    pub preco_custo: Decimal,
    #[schema(value_type = String, example = "5.525")]
    pub preco_venda: Decimal,
    /// Base64 on the wire
    #[serde(default, with = "base64_bytes")]
    #[schema(value_type = Option<String>, format = Byte)]
    pub imagem: Option<Vec<u8>>,
    pub ativo: bool,
    pub codigo_barras: Option<Vec<String>>,
}

impl Produto {
    pub fn resumo(&self) -> ProdutoResumo {
        ProdutoResumo {
            id: self.id,
            descricao: self.descricao.clone(),
            preco_custo: self.preco_custo,
            preco_venda: self.preco_venda,
            ativo: self.ativo,
        }
    }
}

/// Columns read by the PDF export.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct ProdutoResumo {
    pub id: i32,
    pub descricao: String,
    pub preco_custo: Decimal,
    pub preco_venda: Decimal,
    pub ativo: bool,
}

fn default_ativo() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduto {
    #[validate(custom(function = "validate_descricao"))]
    #[schema(example = "Leite Integral 1L")]
    pub descricao: String,

    #[validate(custom(function = "valid_price", message = "precoCusto não é válido"))]
    #[schema(value_type = String, example = "4.250")]
    pub preco_custo: Decimal,

    #[validate(custom(function = "valid_price", message = "precoVenda não é válido"))]
    #[schema(value_type = String, example = "5.525")]
    pub preco_venda: Decimal,

    #[serde(default, with = "base64_bytes")]
    #[schema(value_type = Option<String>, format = Byte)]
    pub imagem: Option<Vec<u8>>,

    #[serde(default = "default_ativo")]
    pub ativo: bool,

    #[serde(default, deserialize_with = "barcodes")]
    #[validate(custom(function = "validate_barcodes"))]
    #[schema(example = json!(["7891000100066"]))]
    pub codigo_barras: Option<Vec<String>>,
}

/// Full replacement of a product. `id` must repeat the path id.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduto {
    #[validate(required(message = "id deve ser informado"))]
    pub id: Option<i32>,

    #[validate(custom(function = "validate_descricao"))]
    pub descricao: String,

    #[validate(custom(function = "valid_price", message = "precoCusto não é válido"))]
    #[schema(value_type = String, example = "4.250")]
    pub preco_custo: Decimal,

    #[validate(custom(function = "valid_price", message = "precoVenda não é válido"))]
    #[schema(value_type = String, example = "5.525")]
    pub preco_venda: Decimal,

    #[serde(default, with = "base64_bytes")]
    #[schema(value_type = Option<String>, format = Byte)]
    pub imagem: Option<Vec<u8>>,

    #[serde(default = "default_ativo")]
    pub ativo: bool,

    #[serde(default, deserialize_with = "barcodes")]
    #[validate(custom(function = "validate_barcodes"))]
    pub codigo_barras: Option<Vec<String>>,
}

impl UpdateProduto {
    /// Omitted optional fields become `None`.
    pub fn into_produto(self, id: i32) -> Produto {
        Produto {
            id,
            descricao: self.descricao,
            preco_custo: self.preco_custo,
            preco_venda: self.preco_venda,
            imagem: self.imagem,
            ativo: self.ativo,
            codigo_barras: self.codigo_barras,
        }
    }
}

fn validate_descricao(descricao: &str) -> Result<(), ValidationError> {
    if descricao.trim().is_empty() {
        return Err(
            ValidationError::new("empty").with_message("descricao não pode ser vazio".into())
        );
    }
    if descricao.chars().count() > 60 {
        return Err(ValidationError::new("length")
            .with_message("descricao contém mais caracteres do que o permitido".into()));
    }
    Ok(())
}

/// Largest integer part `numeric(13,3)` can hold, exclusive.
const PRICE_LIMIT: i64 = 10_000_000_000;
const PRICE_SCALE: u32 = 3;

/// Non-negative and representable as `numeric(13,3)` without rounding.
fn valid_price(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("range"));
    }
    if value.normalize().scale() > PRICE_SCALE || value.abs() >= Decimal::from(PRICE_LIMIT) {
        return Err(ValidationError::new("precision"));
    }
    Ok(())
}

fn validate_barcodes(codes: &Vec<String>) -> Result<(), ValidationError> {
    if codes.iter().any(|code| code.trim().is_empty()) {
        return Err(ValidationError::new("barcode")
            .with_message("codigoBarras não pode ser vazio".into()));
    }
    Ok(())
}

/// Barcodes arrive as strings or as plain numbers.
fn barcodes<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Barcode {
        Text(String),
        Number(u64),
    }

    let codes = Option::<Vec<Barcode>>::deserialize(deserializer)?;
    Ok(codes.map(|codes| {
        codes
            .into_iter()
            .map(|code| match code {
                Barcode::Text(text) => text,
                Barcode::Number(number) => number.to_string(),
            })
            .collect()
    }))
}

mod base64_bytes {
    use base64::{Engine, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .filter(|text| !text.is_empty())
            .map(|text| STANDARD.decode(text).map_err(D::Error::custom))
            .transpose()
    }
}

/// Columns a listing can be ordered or filtered by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ProdutoColumn {
    Id,
    Descricao,
    PrecoCusto,
    PrecoVenda,
    Ativo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl<'de> Deserialize<'de> for SortDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// `{"column": "descricao", "sort": "ASC"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FindAllOrder {
    pub column: ProdutoColumn,
    pub sort: SortDirection,
}

impl Default for FindAllOrder {
    fn default() -> Self {
        Self {
            column: ProdutoColumn::Id,
            sort: SortDirection::Asc,
        }
    }
}

impl FindAllOrder {
    /// Parses the JSON carried in the listing path.
    pub fn parse(raw: &str) -> ProdutoResult<Self> {
        serde_json::from_str(raw).map_err(|_| ProdutoError::InvalidOrder)
    }

    pub fn from_value(value: Value) -> ProdutoResult<Self> {
        serde_json::from_value(value).map_err(|_| ProdutoError::InvalidOrder)
    }
}

/// One typed equality condition.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition {
    Id(i32),
    Descricao(String),
    PrecoCusto(Decimal),
    PrecoVenda(Decimal),
    Ativo(bool),
}

impl FilterCondition {
    fn from_value(value: &Value) -> ProdutoResult<Self> {
        let item = value.as_object().ok_or(ProdutoError::InvalidFilter)?;
        let column = item
            .get("column")
            .and_then(Value::as_str)
            .and_then(|column| ProdutoColumn::from_str(column).ok())
            .ok_or(ProdutoError::InvalidFilter)?;
        let value = item.get("value").ok_or(ProdutoError::InvalidFilter)?;

        let condition = match column {
            ProdutoColumn::Id => value
                .as_i64()
                .and_then(|id| i32::try_from(id).ok())
                .map(FilterCondition::Id),
            ProdutoColumn::Descricao => value
                .as_str()
                .map(|text| FilterCondition::Descricao(text.to_string())),
            ProdutoColumn::PrecoCusto => decimal_of(value).map(FilterCondition::PrecoCusto),
            ProdutoColumn::PrecoVenda => decimal_of(value).map(FilterCondition::PrecoVenda),
            ProdutoColumn::Ativo => value.as_bool().map(FilterCondition::Ativo),
        };

        condition.ok_or(ProdutoError::InvalidFilter)
    }

    pub fn matches(&self, produto: &Produto) -> bool {
        match self {
            FilterCondition::Id(id) => produto.id == *id,
            FilterCondition::Descricao(text) => produto.descricao == *text,
            FilterCondition::PrecoCusto(price) => produto.preco_custo == *price,
            FilterCondition::PrecoVenda(price) => produto.preco_venda == *price,
            FilterCondition::Ativo(ativo) => produto.ativo == *ativo,
        }
    }
}

fn decimal_of(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => Decimal::from_str(&number.to_string()).ok(),
        Value::String(text) => Decimal::from_str(text).ok(),
        _ => None,
    }
}

/// Conjunction of conditions. Accepts a single `{column, value}` object or an
/// array of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindAllFilter(Vec<FilterCondition>);

impl FindAllFilter {
    pub fn new(conditions: Vec<FilterCondition>) -> Self {
        Self(conditions)
    }

    pub fn conditions(&self) -> &[FilterCondition] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, produto: &Produto) -> bool {
        self.0.iter().all(|condition| condition.matches(produto))
    }

    /// Parses the `filter` query parameter; absent or blank means no filter.
    pub fn from_query(raw: Option<&str>) -> ProdutoResult<Self> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(raw) => {
                let value: Value =
                    serde_json::from_str(raw).map_err(|_| ProdutoError::InvalidFilter)?;
                Self::from_value(&value)
            }
        }
    }

    pub fn from_value(value: &Value) -> ProdutoResult<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => Ok(Self(vec![FilterCondition::from_value(value)?])),
            Value::Array(items) => items
                .iter()
                .map(FilterCondition::from_value)
                .collect::<ProdutoResult<Vec<_>>>()
                .map(Self),
            _ => Err(ProdutoError::InvalidFilter),
        }
    }
}

/// Documentation shape of one filter condition.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FilterItem {
    pub column: ProdutoColumn,
    #[schema(value_type = Object, example = json!(true))]
    pub value: Value,
}

/// Body of `POST /produto/export`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    #[validate(required(message = "idUsuario deve ser informado"))]
    #[schema(example = 1)]
    pub id_usuario: Option<i32>,

    #[validate(required(message = "order deve ser informado"))]
    #[schema(value_type = FindAllOrder)]
    pub order: Option<Value>,

    #[serde(default)]
    #[schema(value_type = Option<Vec<FilterItem>>)]
    pub filter: Option<Value>,
}

/// Requesting user as returned by the identity service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Usuario {
    pub id: i32,
    pub nome: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailContext {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    pub base64: String,
}

/// Command consumed by the mail service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnviarEmail {
    pub subject: String,
    pub to: String,
    pub template: String,
    pub context: EmailContext,
    pub attachments: Vec<Attachment>,
}

impl EnviarEmail {
    pub const REPORT_SUBJECT: &'static str = "Exportação de Relatório";
    pub const REPORT_TEMPLATE: &'static str = "exportacao-relatorio";

    /// Report mail with one attachment.
    pub fn relatorio(usuario: &Usuario, filename: String, base64: String) -> Self {
        Self {
            subject: Self::REPORT_SUBJECT.to_string(),
            to: usuario.email.clone(),
            template: Self::REPORT_TEMPLATE.to_string(),
            context: EmailContext {
                name: usuario.nome.clone(),
            },
            attachments: vec![Attachment { filename, base64 }],
        }
    }
}
