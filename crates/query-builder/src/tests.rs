use std::collections::HashSet;

use expect_test::expect;
use serde_json::json;

use crate::{Field, Operation};

fn render(operation: Operation) -> String {
    operation.render().to_string()
}

#[test]
fn single_field_with_variable() {
    let user = Field::new("user")
        .argument("id", "ID!", 5)
        .subfield(Field::new("name"));

    let rendered = Operation::query("GetUser").field(user).render();

    let expected = expect![[r#"
        query GetUser($0_id: ID!) {
          user(id: $0_id) {
            name
          }
        }
    "#]];

    expected.assert_eq(&rendered.to_string());

    assert_eq!(rendered.variables(), json!({ "0_id": 5 }).as_object().unwrap().clone());

    let resolved = &rendered.resolved_variables()["0_id"];
    assert_eq!(resolved.argument_name, "id");
    assert_eq!(resolved.var_type, "ID!");
}

#[test]
fn leaf_field_renders_without_selection_set() {
    let ping = Field::new("ping").argument("limit", "Int", 10);

    let expected = expect![[r#"
        query Ping($0_limit: Int) {
          ping(limit: $0_limit)
        }
    "#]];

    expected.assert_eq(&render(Operation::query("Ping").field(ping)));
}

#[test]
fn alias_precedes_field_name() {
    let user = Field::new("user").alias("me");

    let expected = expect![[r#"
        query Me {
          me: user
        }
    "#]];

    expected.assert_eq(&render(Operation::query("Me").field(user)));
}

#[test]
fn last_alias_wins() {
    let user = Field::new("user").alias("first").alias("second");

    let expected = expect![[r#"
        query Me {
          second: user
        }
    "#]];

    expected.assert_eq(&render(Operation::query("Me").field(user)));
}

#[test]
fn sibling_arguments_do_not_collide() {
    // The same field selected twice under different aliases, both taking an
    // `id` argument: the second occurrence must pick the next free suffix.
    let users = Field::new("users")
        .subfield(
            Field::new("user")
                .alias("a")
                .argument("id", "ID!", 1)
                .subfield(Field::new("name")),
        )
        .subfield(
            Field::new("user")
                .alias("b")
                .argument("id", "ID!", 2)
                .subfield(Field::new("name")),
        );

    let rendered = Operation::query("Users").field(users).render();

    let expected = expect![[r#"
        query Users($0_id: ID!, $0_id_1: ID!) {
          users {
            a: user(id: $0_id) {
              name
            }
            b: user(id: $0_id_1) {
              name
            }
          }
        }
    "#]];

    expected.assert_eq(&rendered.to_string());

    assert_eq!(
        rendered.variables(),
        json!({ "0_id": 1, "0_id_1": 2 }).as_object().unwrap().clone()
    );

    assert_eq!(rendered.resolved_variables()["0_id"].argument_name, "id");
    assert_eq!(rendered.resolved_variables()["0_id_1"].argument_name, "id");
}

#[test]
fn collisions_across_depths_resolve_sequentially() {
    let root = Field::new("node")
        .argument("id", "ID!", 1)
        .subfield(Field::new("child").argument("id", "ID!", 2))
        .subfield(Field::new("child").alias("other").argument("id", "ID!", 3));

    let rendered = Operation::query("Nodes").field(root).render();

    let names: Vec<&str> = rendered.resolved_variables().keys().map(String::as_str).collect();
    assert_eq!(names, ["0_id", "0_id_1", "0_id_2"]);

    // Every name is unique even though all three arguments are called `id`.
    let unique: HashSet<&str> = names.iter().copied().collect();
    assert_eq!(unique.len(), names.len());
}

#[test]
fn rendering_is_deterministic() {
    let build = || {
        Operation::query("Pets").field(
            Field::new("animal")
                .argument("id", "ID!", 7)
                .subfield(Field::new("name"))
                .inline_fragment("Cat", vec![Field::new("whiskers").argument("limit", "Int", 1)]),
        )
    };

    let first = build().render();
    let second = build().render();

    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(first.resolved_variables(), second.resolved_variables());
}

#[test]
fn re_rendering_a_field_resets_its_variables() {
    let mut field = Field::new("user").argument("id", "ID!", 5);

    field.to_ast(0);
    let first = field.formatted_variables();

    field.to_ast(0);
    let second = field.formatted_variables();

    assert_eq!(first, second);
    assert!(second.contains_key("0_id"));
}

#[test]
fn subfields_keep_insertion_order_and_fragments_come_last() {
    let search = Field::new("search")
        .inline_fragment("Post", vec![Field::new("title")])
        .subfield(Field::new("id"))
        .subfield(Field::new("score"));

    let expected = expect![[r#"
        query Search {
          search {
            id
            score
            ... on Post {
              title
            }
          }
        }
    "#]];

    expected.assert_eq(&render(Operation::query("Search").field(search)));
}

#[test]
fn inline_fragments_share_the_variable_pool() {
    let animal = Field::new("animal")
        .inline_fragment("Cat", vec![Field::new("whiskers").argument("limit", "Int", 1)])
        .inline_fragment("Dog", vec![Field::new("barks").argument("limit", "Int", 2)]);

    let rendered = Operation::query("Pets").field(animal).render();

    let expected = expect![[r#"
        query Pets($0_limit: Int, $0_limit_1: Int) {
          animal {
            ... on Cat {
              whiskers(limit: $0_limit)
            }
            ... on Dog {
              barks(limit: $0_limit_1)
            }
          }
        }
    "#]];

    expected.assert_eq(&rendered.to_string());

    assert_eq!(
        rendered.variables(),
        json!({ "0_limit": 1, "0_limit_1": 2 }).as_object().unwrap().clone()
    );
}

#[test]
fn duplicate_inline_fragment_replaces_the_earlier_branch() {
    let animal = Field::new("animal")
        .inline_fragment("Cat", vec![Field::new("whiskers")])
        .inline_fragment("Cat", vec![Field::new("tail")]);

    let expected = expect![[r#"
        query Pets {
          animal {
            ... on Cat {
              tail
            }
          }
        }
    "#]];

    expected.assert_eq(&render(Operation::query("Pets").field(animal)));
}

#[test]
fn root_fields_are_namespaced_by_position() {
    let operation = Operation::query("Pair")
        .field(Field::new("user").argument("id", "ID!", 1))
        .field(Field::new("user").alias("second").argument("id", "ID!", 2));

    let rendered = operation.render();

    let expected = expect![[r#"
        query Pair($0_id: ID!, $1_id: ID!) {
          user(id: $0_id)
          second: user(id: $1_id)
        }
    "#]];

    expected.assert_eq(&rendered.to_string());
}

#[test]
fn mutation_renders_with_its_keyword() {
    let create = Field::new("createUser")
        .argument("input", "UserInput!", json!({ "name": "Alice" }))
        .subfield(Field::new("id"));

    let rendered = Operation::mutation("CreateUser").field(create).render();

    let expected = expect![[r#"
        mutation CreateUser($0_input: UserInput!) {
          createUser(input: $0_input) {
            id
          }
        }
    "#]];

    expected.assert_eq(&rendered.to_string());

    assert_eq!(rendered.variables()["0_input"], json!({ "name": "Alice" }));
}

#[test]
fn wrapped_variable_types_round_trip() {
    let feed = Field::new("feed")
        .argument("tags", "[String!]", json!(["a", "b"]))
        .argument("first", "Int!", 10);

    let expected = expect![[r#"
        query Feed($0_tags: [String!], $0_first: Int!) {
          feed(tags: $0_tags, first: $0_first)
        }
    "#]];

    expected.assert_eq(&render(Operation::query("Feed").field(feed)));
}

#[test]
fn a_seeded_name_pool_is_respected() {
    let mut field = Field::new("user").argument("id", "ID!", 5);

    let mut pool = HashSet::from(["0_id".to_owned()]);
    field.to_ast_with(0, &mut pool);

    assert!(field.formatted_variables().contains_key("0_id_1"));
    assert!(pool.contains("0_id_1"));
}

#[test]
fn empty_type_and_value_pass_through() {
    // The builder does not validate declared types or values.
    let field = Field::new("thing").argument("arg", "", json!(null));

    let rendered = Operation::query("Thing").field(field).render();

    assert!(rendered.to_string().contains("thing(arg: $0_arg)"));
    assert_eq!(rendered.variables()["0_arg"], json!(null));
}
