// Code generated by storz. DO NOT EDIT.

#[allow(unused_imports)]
use storz_core::chrono::{DateTime, Utc};
#[allow(unused_imports)]
use storz_core::indexmap::IndexMap;
#[allow(unused_imports)]
use storz_core::serde_json::Value;
#[allow(unused_imports)]
use storz_core::{
    DATETIME_ZERO, Dict, Error, ExternalHolder, Meta, Object, ObjectIdentity, Result, SchemaHolder,
    Serializable, convert, datetime_parse, datetime_string, meta_factory,
};

/// Generated from struct `Address`.
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    street: String,
    zip: i64,
}

impl Address {
    /// Creates an instance with every property at its default.
    #[must_use]
    pub fn factory() -> Self {
        Self {
            street: String::new(),
            zip: 0,
        }
    }

    /// Returns `street`.
    #[must_use]
    pub fn street(&self) -> &str {
        &self.street
    }

    /// Sets `street`.
    pub fn set_street(&mut self, value: impl Into<String>) {
        self.street = value.into();
    }

    /// Returns `zip`.
    #[must_use]
    pub fn zip(&self) -> i64 {
        self.zip
    }

    /// Sets `zip`.
    pub fn set_zip(&mut self, value: i64) {
        self.zip = value;
    }
}

impl Serializable for Address {
    fn to_dict(&self) -> Dict {
        let mut data = Dict::new();
        data.insert("street".to_string(), Value::from(self.street.clone()));
        data.insert("zip".to_string(), Value::from(self.zip));
        data
    }

    fn from_dict(&mut self, data: &Dict) -> Result<()> {
        for (key, raw) in data {
            if raw.is_null() {
                continue;
            }
            match key.as_str() {
                "street" => self.street = convert::string_value(key, raw)?,
                "zip" => self.zip = convert::int_value(key, raw)?,
                _ => {}
            }
        }
        Ok(())
    }
}

/// Generated from struct `UserState`.
#[derive(Debug, Clone, PartialEq)]
pub struct UserState {
    visits: i64,
    samples: Vec<f64>,
}

impl UserState {
    /// Creates an instance with every property at its default.
    #[must_use]
    pub fn factory() -> Self {
        Self {
            visits: 0,
            samples: Vec::new(),
        }
    }

    /// Returns `visits`.
    #[must_use]
    pub fn visits(&self) -> i64 {
        self.visits
    }

    /// Sets `visits`.
    pub fn set_visits(&mut self, value: i64) {
        self.visits = value;
    }

    /// Returns `samples`.
    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sets `samples`.
    ///
    /// # Errors
    /// Returns `Error::Coercion` for NaN and infinite values.
    pub fn set_samples(&mut self, value: Vec<f64>) -> Result<()> {
        for v in &value {
            convert::finite_float("samples", *v)?;
        }
        self.samples = value;
        Ok(())
    }
}

impl Serializable for UserState {
    fn to_dict(&self) -> Dict {
        let mut data = Dict::new();
        data.insert("visits".to_string(), Value::from(self.visits));
        data.insert("samples".to_string(), Value::Array(self.samples.iter().map(|v| Value::from(*v)).collect()));
        data
    }

    fn from_dict(&mut self, data: &Dict) -> Result<()> {
        for (key, raw) in data {
            if raw.is_null() {
                continue;
            }
            match key.as_str() {
                "visits" => self.visits = convert::int_value(key, raw)?,
                "samples" => {
                    let mut res = Vec::new();
                    for rw in convert::array_value(key, raw)? {
                        res.push(convert::float_value(key, rw)?);
                    }
                    self.samples = res;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Generated from struct `Node`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    label: String,
    children: Vec<Node>,
}

impl Node {
    /// Creates an instance with every property at its default.
    #[must_use]
    pub fn factory() -> Self {
        Self {
            label: String::new(),
            children: Vec::new(),
        }
    }

    /// Returns `label`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Sets `label`.
    pub fn set_label(&mut self, value: impl Into<String>) {
        self.label = value.into();
    }

    /// Returns `children`.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Returns `children` mutably.
    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    /// Sets `children`.
    pub fn set_children(&mut self, value: Vec<Node>) {
        self.children = value;
    }
}

impl Serializable for Node {
    fn to_dict(&self) -> Dict {
        let mut data = Dict::new();
        data.insert("label".to_string(), Value::from(self.label.clone()));
        data.insert("children".to_string(), Value::Array(self.children.iter().map(|v| Value::Object(Serializable::to_dict(v))).collect()));
        data
    }

    fn from_dict(&mut self, data: &Dict) -> Result<()> {
        for (key, raw) in data {
            if raw.is_null() {
                continue;
            }
            match key.as_str() {
                "label" => self.label = convert::string_value(key, raw)?,
                "children" => {
                    let mut res = Vec::new();
                    for rw in convert::array_value(key, raw)? {
                        res.push({
                            let mut ud = Node::factory();
                            Serializable::from_dict(&mut ud, convert::dict_value(key, rw)?)?;
                            ud
                        });
                    }
                    self.children = res;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Generated from struct `UserSpec`.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSpec {
    name: String,
    score: f64,
    admin: bool,
    created_at: String,
    tags: Vec<String>,
    labels: IndexMap<String, i64>,
    address: Option<Address>,
    previous: Vec<Address>,
    contacts: IndexMap<String, Address>,
    extra: Value,
}

impl UserSpec {
    /// Creates an instance with every property at its default.
    #[must_use]
    pub fn factory() -> Self {
        Self {
            name: String::new(),
            score: 0.0,
            admin: false,
            created_at: DATETIME_ZERO.to_string(),
            tags: Vec::new(),
            labels: IndexMap::new(),
            address: Some(Address::factory()),
            previous: Vec::new(),
            contacts: IndexMap::new(),
            extra: Value::Null,
        }
    }

    /// Returns `name`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets `name`.
    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    /// Returns `score`.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Sets `score`.
    ///
    /// # Errors
    /// Returns `Error::Coercion` for NaN and infinite values.
    pub fn set_score(&mut self, value: f64) -> Result<()> {
        self.score = convert::finite_float("score", value)?;
        Ok(())
    }

    /// Returns `admin`.
    #[must_use]
    pub fn admin(&self) -> bool {
        self.admin
    }

    /// Sets `admin`.
    pub fn set_admin(&mut self, value: bool) {
        self.admin = value;
    }

    /// Returns `createdAt`.
    ///
    /// # Errors
    /// Returns `Error::Datetime` if the stored value is not canonical.
    pub fn created_at(&self) -> Result<DateTime<Utc>> {
        datetime_parse(&self.created_at)
    }

    /// Sets `createdAt`.
    pub fn set_created_at(&mut self, value: &DateTime<Utc>) {
        self.created_at = datetime_string(value);
    }

    /// Returns `tags`.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns `tags` mutably.
    pub fn tags_mut(&mut self) -> &mut Vec<String> {
        &mut self.tags
    }

    /// Sets `tags`.
    pub fn set_tags(&mut self, value: Vec<String>) {
        self.tags = value;
    }

    /// Returns `labels`.
    #[must_use]
    pub fn labels(&self) -> &IndexMap<String, i64> {
        &self.labels
    }

    /// Returns `labels` mutably.
    pub fn labels_mut(&mut self) -> &mut IndexMap<String, i64> {
        &mut self.labels
    }

    /// Sets `labels`.
    pub fn set_labels(&mut self, value: IndexMap<String, i64>) {
        self.labels = value;
    }

    /// Returns `address`.
    #[must_use]
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Returns `address` mutably.
    pub fn address_mut(&mut self) -> Option<&mut Address> {
        self.address.as_mut()
    }

    /// Sets `address`.
    pub fn set_address(&mut self, value: Option<Address>) {
        self.address = value;
    }

    /// Returns `previous`.
    #[must_use]
    pub fn previous(&self) -> &[Address] {
        &self.previous
    }

    /// Returns `previous` mutably.
    pub fn previous_mut(&mut self) -> &mut Vec<Address> {
        &mut self.previous
    }

    /// Sets `previous`.
    pub fn set_previous(&mut self, value: Vec<Address>) {
        self.previous = value;
    }

    /// Returns `contacts`.
    #[must_use]
    pub fn contacts(&self) -> &IndexMap<String, Address> {
        &self.contacts
    }

    /// Returns `contacts` mutably.
    pub fn contacts_mut(&mut self) -> &mut IndexMap<String, Address> {
        &mut self.contacts
    }

    /// Sets `contacts`.
    pub fn set_contacts(&mut self, value: IndexMap<String, Address>) {
        self.contacts = value;
    }

    /// Returns `extra`.
    #[must_use]
    pub fn extra(&self) -> &Value {
        &self.extra
    }

    /// Sets `extra`.
    pub fn set_extra(&mut self, value: Value) {
        self.extra = value;
    }
}

impl Serializable for UserSpec {
    fn to_dict(&self) -> Dict {
        let mut data = Dict::new();
        data.insert("name".to_string(), Value::from(self.name.clone()));
        data.insert("score".to_string(), Value::from(self.score));
        data.insert("admin".to_string(), Value::from(self.admin));
        data.insert("createdAt".to_string(), Value::from(self.created_at.clone()));
        data.insert("tags".to_string(), Value::Array(self.tags.iter().map(|v| Value::from(v.clone())).collect()));
        data.insert("labels".to_string(), Value::Object(self.labels.iter().map(|(k, v)| (k.clone(), Value::from(*v))).collect()));
        data.insert("address".to_string(), self.address.as_ref().map_or(Value::Null, |v| Value::Object(Serializable::to_dict(v))));
        data.insert("previous".to_string(), Value::Array(self.previous.iter().map(|v| Value::Object(Serializable::to_dict(v))).collect()));
        data.insert("contacts".to_string(), Value::Object(self.contacts.iter().map(|(k, v)| (k.clone(), Value::Object(Serializable::to_dict(v)))).collect()));
        data.insert("extra".to_string(), self.extra.clone());
        data
    }

    fn from_dict(&mut self, data: &Dict) -> Result<()> {
        for (key, raw) in data {
            if raw.is_null() {
                continue;
            }
            match key.as_str() {
                "name" => self.name = convert::string_value(key, raw)?,
                "score" => self.score = convert::float_value(key, raw)?,
                "admin" => self.admin = convert::bool_value(key, raw)?,
                "createdAt" => self.created_at = convert::string_value(key, raw)?,
                "tags" => {
                    let mut res = Vec::new();
                    for rw in convert::array_value(key, raw)? {
                        res.push(convert::string_value(key, rw)?);
                    }
                    self.tags = res;
                }
                "labels" => {
                    let mut res = IndexMap::new();
                    for (rk, rw) in convert::dict_value(key, raw)? {
                        res.insert(rk.clone(), convert::int_value(key, rw)?);
                    }
                    self.labels = res;
                }
                "address" => Serializable::from_dict(
                    self.address.get_or_insert_with(Address::factory),
                    convert::dict_value(key, raw)?,
                )?,
                "previous" => {
                    let mut res = Vec::new();
                    for rw in convert::array_value(key, raw)? {
                        res.push({
                            let mut ud = Address::factory();
                            Serializable::from_dict(&mut ud, convert::dict_value(key, rw)?)?;
                            ud
                        });
                    }
                    self.previous = res;
                }
                "contacts" => {
                    let mut res = IndexMap::new();
                    for (rk, rw) in convert::dict_value(key, raw)? {
                        res.insert(rk.clone(), {
                            let mut ud = Address::factory();
                            Serializable::from_dict(&mut ud, convert::dict_value(key, rw)?)?;
                            ud
                        });
                    }
                    self.contacts = res;
                }
                "extra" => self.extra = raw.clone(),
                _ => {}
            }
        }
        Ok(())
    }
}

/// Generated from object `User`.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    meta: Meta,
    external: UserSpec,
    internal: UserState,
}

/// Kind of `User` resources.
pub const USER_KIND: &str = "User";

/// Identity prefix shared by every `User`.
pub const USER_KIND_IDENTITY: &str = "user/";

impl User {
    /// Creates a resource with fresh metadata and default fields.
    #[must_use]
    pub fn factory() -> Self {
        Self {
            meta: meta_factory(USER_KIND),
            external: UserSpec::factory(),
            internal: UserState::factory(),
        }
    }

    /// Replaces the metadata.
    pub fn set_metadata(&mut self, meta: Meta) {
        self.meta = meta;
    }

    /// Returns the external fields.
    #[must_use]
    pub fn external(&self) -> &UserSpec {
        &self.external
    }

    pub fn external_mut(&mut self) -> &mut UserSpec {
        &mut self.external
    }

    pub fn set_external(&mut self, value: UserSpec) {
        self.external = value;
    }

    /// Returns the internal fields.
    #[must_use]
    pub fn internal(&self) -> &UserState {
        &self.internal
    }

    pub fn internal_mut(&mut self) -> &mut UserState {
        &mut self.internal
    }

    pub fn set_internal(&mut self, value: UserState) {
        self.internal = value;
    }
}

/// Builds the identity of the `User` with the given primary key.
#[must_use]
pub fn user_identity(primary_key: &str) -> ObjectIdentity {
    ObjectIdentity::new(format!("{USER_KIND_IDENTITY}{primary_key}"))
}

#[must_use]
pub fn user_kind_identity() -> ObjectIdentity {
    ObjectIdentity::new(USER_KIND_IDENTITY)
}

impl Serializable for User {
    fn to_dict(&self) -> Dict {
        let mut data = Dict::new();
        data.insert("metadata".to_string(), Value::Object(Serializable::to_dict(&self.meta)));
        data.insert("external".to_string(), Value::Object(Serializable::to_dict(&self.external)));
        data.insert("internal".to_string(), Value::Object(Serializable::to_dict(&self.internal)));
        data
    }

    fn from_dict(&mut self, data: &Dict) -> Result<()> {
        for (key, raw) in data {
            if raw.is_null() {
                continue;
            }
            match key.as_str() {
                "metadata" => Serializable::from_dict(&mut self.meta, convert::dict_value(key, raw)?)?,
                "external" => Serializable::from_dict(&mut self.external, convert::dict_value(key, raw)?)?,
                "internal" => Serializable::from_dict(&mut self.internal, convert::dict_value(key, raw)?)?,
                _ => {}
            }
        }
        Ok(())
    }
}

impl Object for User {
    fn metadata(&self) -> &Meta {
        &self.meta
    }

    fn metadata_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }

    fn clone_object(&self) -> Result<Box<dyn Object>> {
        let mut copy = Self::factory();
        copy.from_json(&self.to_json()?)?;
        Ok(Box::new(copy))
    }

    fn primary_key(&self) -> String {
        self.external.name.clone()
    }
}

impl ExternalHolder for User {}

/// Generated from object `Session`.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    meta: Meta,
    internal: UserState,
}

/// Kind of `Session` resources.
pub const SESSION_KIND: &str = "Session";

/// Identity prefix shared by every `Session`.
pub const SESSION_KIND_IDENTITY: &str = "session/";

impl Session {
    /// Creates a resource with fresh metadata and default fields.
    #[must_use]
    pub fn factory() -> Self {
        Self {
            meta: meta_factory(SESSION_KIND),
            internal: UserState::factory(),
        }
    }

    /// Replaces the metadata.
    pub fn set_metadata(&mut self, meta: Meta) {
        self.meta = meta;
    }

    /// Returns the internal fields.
    #[must_use]
    pub fn internal(&self) -> &UserState {
        &self.internal
    }

    pub fn internal_mut(&mut self) -> &mut UserState {
        &mut self.internal
    }

    pub fn set_internal(&mut self, value: UserState) {
        self.internal = value;
    }
}

/// Builds the identity of the `Session` with the given primary key.
#[must_use]
pub fn session_identity(primary_key: &str) -> ObjectIdentity {
    ObjectIdentity::new(format!("{SESSION_KIND_IDENTITY}{primary_key}"))
}

#[must_use]
pub fn session_kind_identity() -> ObjectIdentity {
    ObjectIdentity::new(SESSION_KIND_IDENTITY)
}

impl Serializable for Session {
    fn to_dict(&self) -> Dict {
        let mut data = Dict::new();
        data.insert("metadata".to_string(), Value::Object(Serializable::to_dict(&self.meta)));
        data.insert("internal".to_string(), Value::Object(Serializable::to_dict(&self.internal)));
        data
    }

    fn from_dict(&mut self, data: &Dict) -> Result<()> {
        for (key, raw) in data {
            if raw.is_null() {
                continue;
            }
            match key.as_str() {
                "metadata" => Serializable::from_dict(&mut self.meta, convert::dict_value(key, raw)?)?,
                "internal" => Serializable::from_dict(&mut self.internal, convert::dict_value(key, raw)?)?,
                _ => {}
            }
        }
        Ok(())
    }
}

impl Object for Session {
    fn metadata(&self) -> &Meta {
        &self.meta
    }

    fn metadata_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }

    fn clone_object(&self) -> Result<Box<dyn Object>> {
        let mut copy = Self::factory();
        copy.from_json(&self.to_json()?)?;
        Ok(Box::new(copy))
    }

    fn primary_key(&self) -> String {
        self.meta.identity().to_string()
    }
}

/// Generated from object `Tree`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    meta: Meta,
    external: Node,
}

/// Kind of `Tree` resources.
pub const TREE_KIND: &str = "Tree";

/// Identity prefix shared by every `Tree`.
pub const TREE_KIND_IDENTITY: &str = "tree/";

impl Tree {
    /// Creates a resource with fresh metadata and default fields.
    #[must_use]
    pub fn factory() -> Self {
        Self {
            meta: meta_factory(TREE_KIND),
            external: Node::factory(),
        }
    }

    /// Replaces the metadata.
    pub fn set_metadata(&mut self, meta: Meta) {
        self.meta = meta;
    }

    /// Returns the external fields.
    #[must_use]
    pub fn external(&self) -> &Node {
        &self.external
    }

    pub fn external_mut(&mut self) -> &mut Node {
        &mut self.external
    }

    pub fn set_external(&mut self, value: Node) {
        self.external = value;
    }
}

/// Builds the identity of the `Tree` with the given primary key.
#[must_use]
pub fn tree_identity(primary_key: &str) -> ObjectIdentity {
    ObjectIdentity::new(format!("{TREE_KIND_IDENTITY}{primary_key}"))
}

#[must_use]
pub fn tree_kind_identity() -> ObjectIdentity {
    ObjectIdentity::new(TREE_KIND_IDENTITY)
}

impl Serializable for Tree {
    fn to_dict(&self) -> Dict {
        let mut data = Dict::new();
        data.insert("metadata".to_string(), Value::Object(Serializable::to_dict(&self.meta)));
        data.insert("external".to_string(), Value::Object(Serializable::to_dict(&self.external)));
        data
    }

    fn from_dict(&mut self, data: &Dict) -> Result<()> {
        for (key, raw) in data {
            if raw.is_null() {
                continue;
            }
            match key.as_str() {
                "metadata" => Serializable::from_dict(&mut self.meta, convert::dict_value(key, raw)?)?,
                "external" => Serializable::from_dict(&mut self.external, convert::dict_value(key, raw)?)?,
                _ => {}
            }
        }
        Ok(())
    }
}

impl Object for Tree {
    fn metadata(&self) -> &Meta {
        &self.meta
    }

    fn metadata_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }

    fn clone_object(&self) -> Result<Box<dyn Object>> {
        let mut copy = Self::factory();
        copy.from_json(&self.to_json()?)?;
        Ok(Box::new(copy))
    }

    fn primary_key(&self) -> String {
        self.external.label.clone()
    }
}

impl ExternalHolder for Tree {}

/// Registry of every resource kind in this model.
#[derive(Debug, Clone)]
pub struct Schema {
    objects: Vec<String>,
}

/// Returns the model schema.
#[must_use]
pub fn schema() -> Schema {
    Schema {
        objects: vec![
            "User".to_string(),
            "Session".to_string(),
            "Tree".to_string(),
        ],
    }
}

impl SchemaHolder for Schema {
    fn object_for_kind(&self, kind: &str) -> Result<Box<dyn Object>> {
        match kind {
            "User" | "user" | "user/" => Ok(Box::new(User::factory())),
            "Session" | "session" | "session/" => Ok(Box::new(Session::factory())),
            "Tree" | "tree" | "tree/" => Ok(Box::new(Tree::factory())),
            _ => Err(Error::no_such_object(kind)),
        }
    }

    fn types(&self) -> &[String] {
        &self.objects
    }
}
