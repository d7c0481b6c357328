//! End-to-end rewrite scenarios: routed statement in, per-target SQL
//! text and parameter lists out.

use shardsql::pagination::{Pagination, PaginationValue};
use shardsql::rewrite::{
    splice, EncryptValueToken, Expression, PaginationToken, ParameterBuilder, SqlToken,
};
use shardsql::route::{DataNode, RouteResult, RoutingUnit};
use shardsql::statement::{InsertRow, InsertStatement, OptimizedStatement, SelectStatement};
use shardsql::value::ParameterValue;

fn substitution_span(sql: &str, needle: &str) -> (usize, usize) {
    let start = sql.find(needle).unwrap();
    (start, start + needle.len() - 1)
}

#[test]
fn sharded_insert_distributes_rows() {
    // Three-row insert, rows hashed to two shards.
    let statement = OptimizedStatement::Insert(InsertStatement::new(vec![
        InsertRow::new(
            vec![1i64.into(), "alice".into()],
            vec![DataNode::new("ds_0", "t_user_0")],
        ),
        InsertRow::new(
            vec![2i64.into(), "bob".into()],
            vec![DataNode::new("ds_1", "t_user_1")],
        ),
        InsertRow::new(
            vec![4i64.into(), "carol".into()],
            vec![DataNode::new("ds_0", "t_user_0")],
        ),
    ]));
    let route = RouteResult::new(
        statement,
        vec![
            RoutingUnit::new("ds_0").with_table("t_user_0"),
            RoutingUnit::new("ds_1").with_table("t_user_1"),
        ],
    );

    let mut builder = ParameterBuilder::new(vec![]);
    builder.set_insert_units(route.statement());
    builder.set_pagination_rewrite(&route).unwrap();
    let plan = builder.freeze();

    let all: Vec<ParameterValue> = plan.parameters();
    assert_eq!(all.len(), 6);

    let shard_0 = plan.parameters_for(&route.routing_units()[0]);
    assert_eq!(
        shard_0,
        vec![
            ParameterValue::Bigint(1),
            "alice".into(),
            ParameterValue::Bigint(4),
            "carol".into(),
        ]
    );

    let shard_1 = plan.parameters_for(&route.routing_units()[1]);
    assert_eq!(shard_1, vec![ParameterValue::Bigint(2), "bob".into()]);
}

#[test]
fn paginated_select_rewrites_bound_parameters() {
    let statement = OptimizedStatement::Select(SelectStatement::new(Some(Pagination::new(
        Some(PaginationValue::Parameter { index: 1, value: 20 }),
        Some(PaginationValue::Parameter { index: 2, value: 10 }),
    ))));
    let route = RouteResult::new(
        statement,
        vec![
            RoutingUnit::new("ds_0"),
            RoutingUnit::new("ds_1"),
            RoutingUnit::new("ds_2"),
        ],
    );

    // WHERE status = $1 ... OFFSET $2 LIMIT $3
    let mut builder = ParameterBuilder::new(vec!["open".into(), 20i64.into(), 10i64.into()]);
    builder.set_insert_units(route.statement());
    builder.set_pagination_rewrite(&route).unwrap();
    let plan = builder.freeze();

    // Every shard binds the same revised list.
    for unit in route.routing_units() {
        let parameters = plan.parameters_for(unit);
        assert_eq!(parameters[0], "open".into());
        assert_eq!(parameters[1], ParameterValue::Bigint(0));
        assert_eq!(parameters[2], ParameterValue::Bigint(30));
    }
}

#[test]
fn paginated_select_literals_rewritten_in_text() {
    let sql = "SELECT id FROM t_order ORDER BY id LIMIT 5 OFFSET 10";
    let pagination = Pagination::new(
        Some(PaginationValue::Literal(10)),
        Some(PaginationValue::Literal(5)),
    );

    let (limit_start, limit_stop) = substitution_span(sql, "5");
    let (offset_start, offset_stop) = substitution_span(sql, "10");
    let limit = PaginationToken::new(limit_start, limit_stop, pagination.revised_row_count());
    let offset = PaginationToken::new(offset_start, offset_stop, pagination.revised_offset());

    let rewritten = splice(sql, &[&limit, &offset]).unwrap();
    assert_eq!(
        rewritten,
        "SELECT id FROM t_order ORDER BY id LIMIT 15 OFFSET 0"
    );
}

#[test]
fn encrypt_token_substitutes_literal_values() {
    let sql = "INSERT INTO t_user SET id = 1, name = 'bob', bio = UPPER(alias)";

    let (name_start, name_stop) = substitution_span(sql, "'bob'");
    let name = EncryptValueToken::new(
        name_start,
        name_stop,
        Expression::Literal("xK9=".into()),
    );

    let (bio_start, bio_stop) = substitution_span(sql, "UPPER(alias)");
    let bio = EncryptValueToken::new(
        bio_start,
        bio_stop,
        Expression::Complex {
            text: "UPPER(alias)".into(),
        },
    );

    let rewritten = splice(sql, &[&name, &bio]).unwrap();
    assert_eq!(
        rewritten,
        "INSERT INTO t_user SET id = 1, name = 'xK9=', bio = UPPER(alias)"
    );
    assert_eq!(name.stop_index(), Some(name_stop));
}

#[test]
fn per_shard_dispatch_from_parallel_tasks() {
    let statement = OptimizedStatement::Insert(InsertStatement::new(
        (0..64)
            .map(|i| {
                InsertRow::new(
                    vec![(i as i64).into()],
                    vec![DataNode::new(
                        format!("ds_{}", i % 4),
                        format!("t_order_{}", i % 4),
                    )],
                )
            })
            .collect(),
    ));
    let units: Vec<RoutingUnit> = (0..4)
        .map(|i| RoutingUnit::new(format!("ds_{}", i)).with_table(&format!("t_order_{}", i)))
        .collect();

    let mut builder = ParameterBuilder::new(vec![]);
    builder.set_insert_units(&statement);
    let plan = builder.freeze();

    let handles: Vec<_> = units
        .iter()
        .map(|unit| {
            let plan = plan.clone();
            let unit = unit.clone();
            std::thread::spawn(move || plan.parameters_for(&unit))
        })
        .collect();

    let mut total = 0;
    for (i, handle) in handles.into_iter().enumerate() {
        let parameters = handle.join().unwrap();
        assert_eq!(parameters.len(), 16);
        // Rows keep statement order within a shard.
        assert_eq!(parameters[0], ParameterValue::Bigint(i as i64));
        total += parameters.len();
    }
    assert_eq!(total, 64);
}
