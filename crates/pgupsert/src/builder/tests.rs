use super::*;
use crate::row::Cell;

fn request() -> UpsertRequest<i64> {
    UpsertRequest::new("users")
        .on_conflict(["id"])
        .row(Row::new().set("id", 1).set("name", 10).set("age", 20))
}

#[test]
fn target_with_and_without_schema() {
    let bare = request();
    assert_eq!(bare.target().to_sql(&Postgres), r#""users""#);

    let qualified = request().schema("app");
    assert_eq!(qualified.target().to_sql(&Postgres), r#""app"."users""#);
}

#[test]
fn template_keeps_value_tokens_unnumbered() {
    let t = request().to_template().unwrap();
    assert_eq!(t.value_count(), 3);
    assert_eq!(
        t.to_sql(&Generic),
        r#"INSERT INTO "users" ("id","name","age") VALUES (?,?,?) ON CONFLICT ("id") DO UPDATE SET "name" = EXCLUDED."name", "age" = EXCLUDED."age" WHERE "users"."id" = EXCLUDED."id" RETURNING *"#
    );
}

#[test]
fn include_template_renders_both_forms() {
    let stmt = request()
        .options(UpsertOptions::new().with_template())
        .build()
        .unwrap();
    let expected = stmt
        .sql()
        .replace("$1", "?")
        .replace("$2", "?")
        .replace("$3", "?");
    assert_eq!(stmt.template(), Some(expected.as_str()));
}

#[test]
fn template_is_omitted_by_default() {
    assert_eq!(request().build().unwrap().template(), None);
}

#[test]
fn multi_column_conflict_target() {
    let stmt = UpsertRequest::new("memberships")
        .on_conflict(["org_id", "user_id"])
        .row(Row::new().set("org_id", 1).set("user_id", 2).set("role", 3))
        .build()
        .unwrap();

    assert_eq!(
        stmt.sql(),
        r#"INSERT INTO "memberships" ("org_id","user_id","role") VALUES ($1,$2,$3) ON CONFLICT ("org_id","user_id") DO UPDATE SET "role" = EXCLUDED."role" WHERE "memberships"."org_id" = EXCLUDED."org_id" AND "memberships"."user_id" = EXCLUDED."user_id" RETURNING *"#
    );
}

#[test]
fn duplicate_conflict_columns_are_dropped() {
    let stmt = request().on_conflict(["id", "id"]).build().unwrap();
    assert!(stmt.sql().contains(r#"ON CONFLICT ("id") DO UPDATE"#));
    assert!(stmt.sql().contains(r#"WHERE "users"."id" = EXCLUDED."id" RETURNING"#));
}

#[test]
fn only_constraint_columns_means_do_nothing() {
    let stmt = UpsertRequest::new("tags")
        .on_conflict(["name"])
        .row(Row::new().set("name", 1))
        .build()
        .unwrap();

    assert_eq!(
        stmt.sql(),
        r#"INSERT INTO "tags" ("name") VALUES ($1) ON CONFLICT ("name") DO NOTHING RETURNING *"#
    );
}

#[test]
fn custom_exclusions_replace_constraint_default() {
    let stmt = request().exclude_from_update(["age"]).build().unwrap();
    let expected = r#"DO UPDATE SET "id" = EXCLUDED."id", "name" = EXCLUDED."name" WHERE"#;
    assert!(stmt.sql().contains(expected));
}

#[test]
fn excluding_everything_means_do_nothing() {
    let stmt = request()
        .exclude_from_update(["id", "name", "age"])
        .build()
        .unwrap();
    assert!(stmt.sql().ends_with(r#"ON CONFLICT ("id") DO NOTHING RETURNING *"#));
}

#[test]
fn conflict_target_restatement_can_be_disabled() {
    let stmt = request()
        .options(UpsertOptions::new().restate_conflict_target(false))
        .build()
        .unwrap();
    let expected = r#"SET "name" = EXCLUDED."name", "age" = EXCLUDED."age" RETURNING *"#;
    assert!(stmt.sql().ends_with(expected));
    assert!(!stmt.sql().contains("WHERE"));
}

#[test]
fn returning_can_be_disabled() {
    let stmt = request()
        .options(UpsertOptions::new().returning(false))
        .build()
        .unwrap();
    assert!(stmt.sql().ends_with(r#"WHERE "users"."id" = EXCLUDED."id""#));
}

#[test]
fn keyless_rows_build_an_empty_column_list() {
    let stmt = UpsertRequest::<i64>::new("x")
        .on_conflict(["id"])
        .row(Row::new())
        .row(Row::new())
        .build()
        .unwrap();

    assert_eq!(
        stmt.sql(),
        r#"INSERT INTO "x" () VALUES (),() ON CONFLICT ("id") DO NOTHING RETURNING *"#
    );
    assert!(stmt.bindings().is_empty());
}

#[test]
fn quotes_are_escaped_everywhere() {
    let stmt = UpsertRequest::new(r#"od"d"#)
        .on_conflict([r#"k"ey"#])
        .row(Row::new().set(r#"k"ey"#, 1).set("v", 2))
        .build()
        .unwrap();
    assert_eq!(
        stmt.sql(),
        r#"INSERT INTO "od""d" ("k""ey","v") VALUES ($1,$2) ON CONFLICT ("k""ey") DO UPDATE SET "v" = EXCLUDED."v" WHERE "od""d"."k""ey" = EXCLUDED."k""ey" RETURNING *"#
    );
}

#[test]
fn validation_order() {
    let empty: UpsertRequest<i64> = UpsertRequest::new(" ");
    assert_eq!(empty.build().unwrap_err(), UpsertError::EmptyTable);

    let no_rows: UpsertRequest<i64> = UpsertRequest::new("t");
    assert_eq!(no_rows.build().unwrap_err(), UpsertError::EmptyRows);

    let no_target = UpsertRequest::new("t").row(Row::new().set("a", 1));
    assert_eq!(
        no_target.build().unwrap_err(),
        UpsertError::EmptyConstraintColumns
    );
}

#[test]
fn rejects_nul_in_names() {
    let bad_col = request().row(Row::new().set("bad\0", 1));
    assert!(matches!(
        bad_col.build(),
        Err(UpsertError::InvalidIdent(_))
    ));

    let bad_schema = request().schema("");
    assert!(matches!(
        bad_schema.build(),
        Err(UpsertError::InvalidIdent(_))
    ));
}

#[test]
fn policy_runs_after_shape_checks() {
    let req = UpsertRequest::new("t")
        .missing_keys(MissingKeyPolicy::Throw)
        .row(Row::new().set("a", 1))
        .row(Row::new().set("b", 2));
    assert_eq!(req.build().unwrap_err(), UpsertError::EmptyConstraintColumns);

    let req = req.on_conflict(["a"]);
    assert_eq!(
        req.build().unwrap_err(),
        UpsertError::inconsistent_keys(["a", "b"])
    );
}

#[test]
fn cell_plans_drive_values() {
    let req = UpsertRequest::new("t").on_conflict(["a"]).rows([
        Row::new().set("a", 1).set_cell("b", Cell::UseDefault),
        Row::new().set("b", 2),
    ]);
    let stmt = req.build().unwrap();
    assert!(stmt.sql().contains("VALUES ($1,DEFAULT),(DEFAULT,$2)"));
    assert_eq!(stmt.bindings(), [1, 2]);
}
