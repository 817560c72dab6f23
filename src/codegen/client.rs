//! Typed Rust client helpers: `insert_*`, `select_*` and `update_*` per table.
//!
//! The helpers only depend on two traits the caller implements over whatever
//! driver it uses: `Execer` runs a statement, `Queryer` fetches one row.
//! Code is assembled as tokens, parsed back with `syn` and printed with
//! `prettyplease`.

use heck::ToSnakeCase;
use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::{format_ident, quote};

use crate::codegen::batch::{build_select, build_update, insert_columns, InsertStatement};
use crate::codegen::Generator;
use crate::schema::{Column, Table};

pub const HEADER: &str = "// Code generated by ddlmaker; DO NOT EDIT.\n\n";

/// Renders the client helper module.
pub struct ClientGenerator;

impl Generator for ClientGenerator {
    fn generate(&self, tables: &[Table]) -> syn::Result<String> {
        let mut items = vec![preamble()];
        for table in tables {
            items.push(generate_table(table)?);
        }
        let file: syn::File = syn::parse2(quote! { #(#items)* })?;

        let mut output = String::from(HEADER);
        output.push_str(&prettyplease::unparse(&file));
        Ok(output)
    }
}

/// Parse `name` as an identifier, falling back to a raw identifier for keywords.
fn ident(name: &str) -> syn::Result<Ident> {
    syn::parse_str::<Ident>(name)
        .or_else(|_| syn::parse_str::<Ident>(&format!("r#{name}")))
        .map_err(|_| syn::Error::new(Span::call_site(), format!("invalid identifier {name:?}")))
}

fn field_type(col: &Column) -> syn::Result<TokenStream> {
    let ty: syn::Type = syn::parse_str(col.rust_type)?;
    Ok(if col.nullable {
        quote! { Option<#ty> }
    } else {
        quote! { #ty }
    })
}

/// Scalar record types and the `Value` variant each converts into.
const SCALARS: &[(&str, &str)] = &[
    ("i8", "Int"),
    ("i16", "Int"),
    ("i32", "Int"),
    ("i64", "Int"),
    ("u8", "UInt"),
    ("u16", "UInt"),
    ("u32", "UInt"),
    ("u64", "UInt"),
];

fn preamble() -> TokenStream {
    let integers = SCALARS.iter().map(|&(ty, variant)| {
        let wide = if variant == "Int" {
            quote! { i64 }
        } else {
            quote! { u64 }
        };
        let ty = format_ident!("{}", ty);
        let variant = format_ident!("{}", variant);
        quote! {
            impl From<#ty> for Value {
                fn from(v: #ty) -> Self {
                    Value::#variant(#wide::from(v))
                }
            }

            impl FromValue for #ty {
                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::Int(n) => Self::try_from(n).ok(),
                        Value::UInt(n) => Self::try_from(n).ok(),
                        _ => None,
                    }
                }
            }
        }
    });

    quote! {
        #[doc = " A statement argument, or a column value read back from a row."]
        #[derive(Debug, Clone, PartialEq)]
        pub enum Value {
            Null,
            Int(i64),
            UInt(u64),
            Float(f64),
            Text(String),
            Bytes(Vec<u8>),
        }

        #[doc = " A row value could not be converted into its record field."]
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct DecodeError {
            pub column: &'static str,
        }

        impl std::fmt::Display for DecodeError {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "cannot decode column {:?}", self.column)
            }
        }

        impl std::error::Error for DecodeError {}

        pub trait FromValue: Sized {
            fn from_value(value: Value) -> Option<Self>;
        }

        impl<T: Into<Value>> From<Option<T>> for Value {
            fn from(v: Option<T>) -> Self {
                match v {
                    Some(v) => v.into(),
                    None => Value::Null,
                }
            }
        }

        impl<T: FromValue> FromValue for Option<T> {
            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::Null => Some(None),
                    value => T::from_value(value).map(Some),
                }
            }
        }

        #(#integers)*

        impl From<bool> for Value {
            fn from(v: bool) -> Self {
                Value::Int(i64::from(v))
            }
        }

        impl FromValue for bool {
            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::Int(n) => Some(n != 0),
                    Value::UInt(n) => Some(n != 0),
                    _ => None,
                }
            }
        }

        impl From<f32> for Value {
            fn from(v: f32) -> Self {
                Value::Float(f64::from(v))
            }
        }

        impl FromValue for f32 {
            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::Float(f) => Some(f as f32),
                    _ => None,
                }
            }
        }

        impl From<f64> for Value {
            fn from(v: f64) -> Self {
                Value::Float(v)
            }
        }

        impl FromValue for f64 {
            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::Float(f) => Some(f),
                    _ => None,
                }
            }
        }

        impl From<String> for Value {
            fn from(v: String) -> Self {
                Value::Text(v)
            }
        }

        impl FromValue for String {
            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::Text(s) => Some(s),
                    Value::Bytes(b) => String::from_utf8(b).ok(),
                    _ => None,
                }
            }
        }

        impl From<Vec<u8>> for Value {
            fn from(v: Vec<u8>) -> Self {
                Value::Bytes(v)
            }
        }

        impl FromValue for Vec<u8> {
            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::Bytes(b) => Some(b),
                    Value::Text(s) => Some(s.into_bytes()),
                    _ => None,
                }
            }
        }

        #[doc = " Runs a statement that returns no rows."]
        pub trait Execer {
            type Error;

            fn exec(&mut self, query: &str, args: &[Value]) -> Result<(), Self::Error>;
        }

        #[doc = " Runs a statement that returns exactly one row."]
        pub trait Queryer {
            type Error: From<DecodeError>;

            fn query_row(&mut self, query: &str, args: &[Value]) -> Result<Vec<Value>, Self::Error>;
        }

        fn scan<T: FromValue, E: From<DecodeError>>(
            row: &mut std::vec::IntoIter<Value>,
            column: &'static str,
        ) -> Result<T, E> {
            row.next()
                .and_then(T::from_value)
                .ok_or_else(|| E::from(DecodeError { column }))
        }
    }
}

fn generate_table(table: &Table) -> syn::Result<TokenStream> {
    let record = ident(&table.record)?;
    let fields = table
        .columns
        .iter()
        .map(|col| {
            let name = ident(&col.field)?;
            let ty = field_type(col)?;
            Ok(quote! { pub #name: #ty })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let doc = format!(" A row of the `{}` table.", table.name);
    let insert = generate_insert(table, &record)?;
    let select = generate_select(table, &record)?;
    let update = generate_update(table, &record)?;

    Ok(quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct #record {
            #(#fields,)*
        }

        #insert
        #select
        #update
    })
}

fn function_name(prefix: &str, table: &Table) -> syn::Result<Ident> {
    ident(&format!("{prefix}_{}", table.record.to_snake_case()))
}

fn generate_insert(table: &Table, record: &Ident) -> syn::Result<TokenStream> {
    let name = function_name("insert", table)?;
    let stmt = InsertStatement::new(table);
    let query = stmt.text.as_str();
    let head_len = Literal::usize_unsuffixed(stmt.head_len);
    let tuple_len = Literal::usize_unsuffixed(stmt.tuple_len);
    let max_batch = Literal::usize_unsuffixed(stmt.batch_cap);
    let field_count = Literal::usize_unsuffixed(stmt.field_count);

    let values = insert_columns(table)
        .map(|col| ident(&col.field))
        .collect::<syn::Result<Vec<_>>>()?;
    let push_args = if values.is_empty() {
        quote! {}
    } else {
        quote! {
            for v in chunk {
                #(args.push(Value::from(v.#values.clone()));)*
            }
        }
    };

    Ok(quote! {
        pub fn #name<E: Execer>(execer: &mut E, values: &[#record]) -> Result<(), E::Error> {
            const QUERY: &str = #query;
            const HEAD_LEN: usize = #head_len;
            const TUPLE_LEN: usize = #tuple_len;
            const MAX_BATCH: usize = #max_batch;
            const FIELD_COUNT: usize = #field_count;

            let mut args: Vec<Value> = Vec::with_capacity(values.len().min(MAX_BATCH) * FIELD_COUNT);
            for chunk in values.chunks(MAX_BATCH) {
                args.clear();
                #push_args
                execer.exec(&QUERY[..HEAD_LEN + chunk.len() * TUPLE_LEN], &args)?;
            }
            Ok(())
        }
    })
}

fn generate_select(table: &Table, record: &Ident) -> syn::Result<TokenStream> {
    let name = function_name("select", table)?;
    let query = build_select(table);

    let mut params = Vec::new();
    let mut args = Vec::new();
    for col in table.primary_key_columns() {
        let param = ident(&col.field)?;
        let ty = field_type(col)?;
        params.push(quote! { #param: #ty });
        args.push(quote! { Value::from(#param) });
    }

    let scans = table
        .columns
        .iter()
        .map(|col| {
            let field = ident(&col.field)?;
            let column = col.name.as_str();
            Ok(quote! { #field: scan(&mut row, #column)? })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(quote! {
        pub fn #name<Q: Queryer>(queryer: &mut Q, #(#params),*) -> Result<#record, Q::Error> {
            let mut row = queryer.query_row(#query, &[#(#args),*])?.into_iter();
            Ok(#record {
                #(#scans,)*
            })
        }
    })
}

fn generate_update(table: &Table, record: &Ident) -> syn::Result<TokenStream> {
    let name = function_name("update", table)?;

    // An empty SET clause is not valid SQL; there is nothing to update.
    let Some(query) = build_update(table) else {
        return Ok(quote! {
            pub fn #name<E: Execer>(_execer: &mut E, _value: &#record) -> Result<(), E::Error> {
                Ok(())
            }
        });
    };

    let sets = table
        .columns
        .iter()
        .filter(|c| !table.is_primary_key_column(&c.name))
        .map(|c| ident(&c.field))
        .collect::<syn::Result<Vec<_>>>()?;
    let keys = table
        .primary_key_columns()
        .into_iter()
        .map(|c| ident(&c.field))
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(quote! {
        pub fn #name<E: Execer>(execer: &mut E, value: &#record) -> Result<(), E::Error> {
            execer.exec(
                #query,
                &[
                    #(Value::from(value.#sets.clone()),)*
                    #(Value::from(value.#keys.clone()),)*
                ],
            )
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::{Description, FieldDescriptor, FieldKind};
    use crate::schema::build_tables;

    fn render(descs: &[Description]) -> String {
        let tables = build_tables(descs).unwrap();
        ClientGenerator.generate(&tables).unwrap()
    }

    fn user() -> Description {
        Description::new("User")
            .field(FieldDescriptor::new("id", FieldKind::I64).auto_increment())
            .field(FieldDescriptor::new("name", FieldKind::String))
            .field(FieldDescriptor::new("nickname", FieldKind::String).nullable())
            .primary_key(["id"])
    }

    fn function<'a>(file: &'a syn::File, name: &str) -> &'a syn::ItemFn {
        file.items
            .iter()
            .find_map(|item| match item {
                syn::Item::Fn(f) if f.sig.ident == name => Some(f),
                _ => None,
            })
            .unwrap_or_else(|| panic!("function {name} not generated"))
    }

    #[test]
    fn test_output_is_valid_rust() {
        let code = render(&[user()]);
        assert!(code.starts_with(HEADER));
        let file = syn::parse_file(&code).unwrap();
        for name in ["insert_user", "select_user", "update_user"] {
            function(&file, name);
        }
        assert!(code.contains("pub trait Execer"));
        assert!(code.contains("pub trait Queryer"));
        assert!(code.contains("pub struct User"));
        assert!(code.contains("pub nickname: Option<String>"));
    }

    #[test]
    fn test_contracts_defined_once() {
        let code = render(&[user(), Description::new("Tag")
            .field(FieldDescriptor::new("id", FieldKind::U32))
            .primary_key(["id"])]);
        assert_eq!(code.matches("pub trait Execer").count(), 1);
        assert_eq!(code.matches("pub trait Queryer").count(), 1);
        assert_eq!(code.matches("pub enum Value").count(), 1);
        assert!(code.contains("pub fn insert_tag"));
    }

    #[test]
    fn test_insert_embeds_full_batch_statement() {
        let code = render(&[user()]);
        let tables = build_tables(&[user()]).unwrap();
        let stmt = InsertStatement::new(&tables[0]);
        let file = syn::parse_file(&code).unwrap();
        let insert = function(&file, "insert_user");
        let body = quote!(#insert).to_string();
        assert!(body.contains(&Literal::string(&stmt.text).to_string()));
        assert!(body.contains(&format!("HEAD_LEN : usize = {}", stmt.head_len)));
        assert!(body.contains(&format!("TUPLE_LEN : usize = {}", stmt.tuple_len)));
        assert!(body.contains("MAX_BATCH : usize = 32"));
        assert!(!body.contains("v . id"));
        assert!(body.contains("v . nickname . clone ()"));
    }

    #[test]
    fn test_select_takes_primary_key_values() {
        let code = render(&[user()]);
        let file = syn::parse_file(&code).unwrap();
        let sig = &function(&file, "select_user").sig;
        assert_eq!(sig.inputs.len(), 2);
        let sig = quote!(#sig).to_string();
        assert!(sig.contains("id : i64"));
        assert!(sig.contains("Result < User , Q :: Error >"));
        assert!(code.contains("\"SELECT `id`, `name`, `nickname` FROM `user` WHERE `id` = ?\""));
    }

    #[test]
    fn test_update_binds_set_columns_then_keys() {
        let code = render(&[user()]);
        let file = syn::parse_file(&code).unwrap();
        let update = function(&file, "update_user");
        let update = quote!(#update).to_string();
        let name = update.find("value . name").unwrap();
        let nickname = update.find("value . nickname").unwrap();
        let id = update.find("value . id").unwrap();
        assert!(name < nickname && nickname < id);
        assert!(update.contains("UPDATE `user` SET `name` = ?, `nickname` = ? WHERE `id` = ?"));
    }

    #[test]
    fn test_update_without_non_key_columns_is_a_no_op() {
        let code = render(&[Description::new("Tag")
            .field(FieldDescriptor::new("id", FieldKind::U32))
            .primary_key(["id"])]);
        let file = syn::parse_file(&code).unwrap();
        let update = function(&file, "update_tag");
        let body = quote!(#update).to_string();
        assert!(!body.contains("exec ("));
        assert!(!code.contains("UPDATE `tag`"));
        assert!(body.contains("Ok (())"));
    }

    #[test]
    fn test_keyword_field_names_become_raw_identifiers() {
        let code = render(&[Description::new("Item")
            .field(FieldDescriptor::new("id", FieldKind::I32))
            .field(FieldDescriptor::new("type", FieldKind::String))
            .primary_key(["id"])]);
        assert!(code.contains("pub r#type: String"));
    }

    #[test]
    fn test_invalid_identifier_is_an_error() {
        let tables = build_tables(&[Description::new("Bad Name")
            .field(FieldDescriptor::new("id", FieldKind::I32))
            .table("bad")
            .primary_key(["id"])])
        .unwrap();
        let err = ClientGenerator.generate(&tables).unwrap_err();
        assert!(err.to_string().contains("invalid identifier \"Bad Name\""));
    }

    #[test]
    fn test_deterministic() {
        let descs = [user()];
        assert_eq!(render(&descs), render(&descs));
    }

    /// The descriptions `testdata/client.rs` was rendered from.
    fn fixture_descriptions() -> Vec<Description> {
        vec![
            Description::new("User")
                .field(FieldDescriptor::new("id", FieldKind::I64).auto_increment())
                .field(FieldDescriptor::new("name", FieldKind::String))
                .field(FieldDescriptor::new("nick", FieldKind::String).nullable())
                .primary_key(["id"]),
            Description::new("Tag")
                .field(FieldDescriptor::new("id", FieldKind::U32))
                .primary_key(["id"]),
            Description::new("Pair")
                .field(FieldDescriptor::new("a", FieldKind::I32))
                .field(FieldDescriptor::new("b", FieldKind::I32))
                .field(FieldDescriptor::new("v", FieldKind::String))
                .primary_key(["b", "a"]),
        ]
    }

    fn literals(tokens: TokenStream, out: &mut Vec<String>) {
        for tt in tokens {
            match tt {
                proc_macro2::TokenTree::Group(g) => literals(g.stream(), out),
                proc_macro2::TokenTree::Literal(l) => out.push(l.to_string()),
                _ => {}
            }
        }
    }

    /// Struct fields, plus signature and literals of every per-table function.
    fn outline(file: &syn::File) -> Vec<String> {
        let mut out = Vec::new();
        for item in &file.items {
            match item {
                syn::Item::Struct(s) => {
                    out.push(s.ident.to_string());
                    out.extend(s.fields.iter().map(|f| quote!(#f).to_string()));
                }
                syn::Item::Fn(f) if f.sig.ident != "scan" => {
                    let sig = &f.sig;
                    out.push(quote!(#sig).to_string());
                    let block = &f.block;
                    literals(quote!(#block), &mut out);
                }
                _ => {}
            }
        }
        out
    }

    #[test]
    fn test_fixture_is_current() {
        let rendered = syn::parse_file(&render(&fixture_descriptions())).unwrap();
        let fixture = syn::parse_file(include_str!("testdata/client.rs")).unwrap();
        assert_eq!(outline(&rendered), outline(&fixture));
    }

    #[allow(dead_code, clippy::clone_on_copy)]
    mod generated {
        include!("testdata/client.rs");
    }

    use generated::{DecodeError, Execer, Pair, Queryer, Tag, User, Value};

    #[derive(Debug, PartialEq)]
    enum MockError {
        Refused,
        Decode(DecodeError),
    }

    impl From<DecodeError> for MockError {
        fn from(e: DecodeError) -> Self {
            MockError::Decode(e)
        }
    }

    /// Records every statement. `fail_at` refuses the call with that index.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(String, Vec<Value>)>,
        fail_at: Option<usize>,
        row: Vec<Value>,
    }

    impl Execer for Recorder {
        type Error = MockError;

        fn exec(&mut self, query: &str, args: &[Value]) -> Result<(), MockError> {
            if self.fail_at == Some(self.calls.len()) {
                return Err(MockError::Refused);
            }
            self.calls.push((query.to_string(), args.to_vec()));
            Ok(())
        }
    }

    impl Queryer for Recorder {
        type Error = MockError;

        fn query_row(&mut self, query: &str, args: &[Value]) -> Result<Vec<Value>, MockError> {
            self.calls.push((query.to_string(), args.to_vec()));
            Ok(self.row.clone())
        }
    }

    fn users(n: usize) -> Vec<User> {
        (0..n)
            .map(|i| User {
                id: 0,
                name: format!("user{i}"),
                nick: (i % 2 == 1).then(|| format!("nick{i}")),
            })
            .collect()
    }

    fn user_insert() -> InsertStatement {
        let tables = build_tables(&fixture_descriptions()).unwrap();
        InsertStatement::new(&tables[0])
    }

    #[test]
    fn test_insert_splits_at_batch_cap() {
        let mut db = Recorder::default();
        generated::insert_user(&mut db, &users(33)).unwrap();

        assert_eq!(db.calls.len(), 2);
        assert_eq!(db.calls[0].0, user_insert().text);
        assert_eq!(db.calls[0].1.len(), 64);
        assert_eq!(
            db.calls[0].1[..4],
            [
                Value::Text("user0".to_string()),
                Value::Null,
                Value::Text("user1".to_string()),
                Value::Text("nick1".to_string()),
            ]
        );
        assert_eq!(db.calls[1].0, "INSERT INTO `user` (`name`, `nick`) VALUES (?, ?)");
        assert_eq!(
            db.calls[1].1,
            vec![Value::Text("user32".to_string()), Value::Null]
        );
    }

    #[test]
    fn test_insert_full_batch_is_one_statement() {
        let mut db = Recorder::default();
        generated::insert_user(&mut db, &users(32)).unwrap();
        assert_eq!(db.calls.len(), 1);
        assert_eq!(db.calls[0].1.len(), 64);

        let mut db = Recorder::default();
        generated::insert_user(&mut db, &[]).unwrap();
        assert!(db.calls.is_empty());
    }

    #[test]
    fn test_insert_stops_at_first_failing_chunk() {
        let mut db = Recorder {
            fail_at: Some(1),
            ..Default::default()
        };
        let err = generated::insert_user(&mut db, &users(70)).unwrap_err();
        assert_eq!(err, MockError::Refused);
        // The first chunk stays applied; the third is never sent.
        assert_eq!(db.calls.len(), 1);
        assert_eq!(db.calls[0].1.len(), 64);
    }

    #[test]
    fn test_update_of_key_only_table_issues_nothing() {
        let mut db = Recorder::default();
        generated::update_tag(&mut db, &Tag { id: 7 }).unwrap();
        assert!(db.calls.is_empty());
    }

    #[test]
    fn test_update_binds_values_then_keys() {
        let mut db = Recorder::default();
        let pair = Pair {
            a: 1,
            b: 2,
            v: "x".to_string(),
        };
        generated::update_pair(&mut db, &pair).unwrap();
        assert_eq!(
            db.calls,
            vec![(
                "UPDATE `pair` SET `v` = ? WHERE `b` = ? AND `a` = ?".to_string(),
                vec![Value::Text("x".to_string()), Value::Int(2), Value::Int(1)],
            )]
        );
    }

    #[test]
    fn test_select_binds_key_order_and_scans_row() {
        let mut db = Recorder {
            row: vec![Value::Int(1), Value::Int(2), Value::Text("x".to_string())],
            ..Default::default()
        };
        let pair = generated::select_pair(&mut db, 2, 1).unwrap();
        assert_eq!(
            pair,
            Pair {
                a: 1,
                b: 2,
                v: "x".to_string()
            }
        );
        assert_eq!(db.calls[0].1, vec![Value::Int(2), Value::Int(1)]);

        db.row.truncate(2);
        let err = generated::select_pair(&mut db, 2, 1).unwrap_err();
        assert_eq!(err, MockError::Decode(DecodeError { column: "v" }));
    }

    #[test]
    fn test_select_reads_null_into_option() {
        let mut db = Recorder {
            row: vec![Value::Int(5), Value::Text("ann".to_string()), Value::Null],
            ..Default::default()
        };
        let user = generated::select_user(&mut db, 5).unwrap();
        assert_eq!(user.nick, None);
        assert_eq!(user.name, "ann");
        assert_eq!(db.calls[0].1, vec![Value::Int(5)]);
    }
}
