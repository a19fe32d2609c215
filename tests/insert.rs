use pretty_assertions::assert_eq;
use segroute::{FormatError, InsertError, PathTrie, Router};

struct InsertTest(Vec<(&'static str, Result<(), InsertError>)>);

impl InsertTest {
    fn run(self) {
        let mut trie = PathTrie::new();
        for (route, expected) in self.0 {
            let got = trie.insert(route, route.to_owned());
            assert_eq!(got, expected, "{route}");
        }
    }
}

fn conflict(path: &'static str, with: &'static str) -> InsertError {
    InsertError::Conflict {
        path: path.into(),
        with: with.into(),
    }
}

#[test]
fn wildcard_conflict() {
    InsertTest(vec![
        ("cmd.{tool}.{sub}", Ok(())),
        ("cmd.vet", Ok(())),
        ("foo.bar", Ok(())),
        ("foo.{name}", Ok(())),
        ("foo.{names}", Err(conflict("foo.{names}", "foo.{name}"))),
        ("foo/{other}", Err(conflict("foo/{other}", "foo.{name}"))),
        ("cmd.{xxx}.names", Ok(())),
        ("cmd.{tool}.{xxx}.foo", Ok(())),
        ("cmd.{a}.{b}", Err(conflict("cmd.{a}.{b}", "cmd.{tool}.{sub}"))),
        ("search.{query}", Ok(())),
        ("search.valid", Ok(())),
        ("user_{name}", Ok(())),
        ("user_x", Ok(())),
        ("user_{bar}", Ok(())),
        ("user_{bar}", Err(conflict("user_{bar}", "user_{bar}"))),
        ("id{id}", Ok(())),
        ("id.{id}", Ok(())),
    ])
    .run()
}

#[test]
fn child_conflict() {
    InsertTest(vec![
        ("cmd.vet", Ok(())),
        ("cmd.{tool}", Ok(())),
        ("cmd.{tool}.{sub}", Ok(())),
        ("cmd.{tool}.misc", Ok(())),
        ("cmd.{tool}.{bad}", Err(conflict("cmd.{tool}.{bad}", "cmd.{tool}.{sub}"))),
        ("src.AUTHORS", Ok(())),
        ("user_x", Ok(())),
        ("id.{id}", Ok(())),
        ("{id}", Ok(())),
        ("{x}", Err(conflict("{x}", "{id}"))),
    ])
    .run()
}

#[test]
fn duplicates() {
    InsertTest(vec![
        ("", Ok(())),
        ("", Err(conflict("", ""))),
        ("doc", Ok(())),
        ("doc", Err(conflict("doc", "doc"))),
        ("doc.", Err(conflict("doc.", "doc"))),
        ("search.{query}", Ok(())),
        ("search.{query}", Err(conflict("search.{query}", "search.{query}"))),
        ("search/{q}", Err(conflict("search/{q}", "search.{query}"))),
        ("a/b.c", Ok(())),
        ("a.b/c", Err(conflict("a.b/c", "a/b.c"))),
    ])
    .run()
}

#[test]
fn normalized_conflict() {
    InsertTest(vec![
        ("x.{foo}.bar", Ok(())),
        ("x.{bar}.bar", Err(conflict("x.{bar}.bar", "x.{foo}.bar"))),
        ("{y}.bar.baz", Ok(())),
        ("{y}.baz.baz", Ok(())),
        ("{z}.bar.bat", Ok(())),
        ("{z}.bar.baz", Err(conflict("{z}.bar.baz", "{y}.bar.baz"))),
    ])
    .run()
}

#[test]
fn invalid_params_are_literals() {
    InsertTest(vec![
        ("{}", Ok(())),
        ("{1x}", Ok(())),
        ("{a-b}", Ok(())),
        ("{", Ok(())),
        ("}", Ok(())),
        ("x{y}", Ok(())),
        ("{x}y", Ok(())),
        ("{x}", Ok(())),
        ("{y}", Err(conflict("{y}", "{x}"))),
    ])
    .run();

    let mut trie = PathTrie::new();
    trie.insert("a.{}", 1).unwrap();
    trie.insert("a.{name}", 2).unwrap();

    assert_eq!(*trie.find("a.{}").unwrap().value, 1);
    assert_eq!(*trie.find("a.z").unwrap().value, 2);
}

#[test]
fn first_registration_survives_conflict() {
    let mut trie = PathTrie::new();
    trie.insert("students.{id}", "first").unwrap();
    assert!(trie.insert("students.{name}", "second").is_err());

    let matched = trie.find("students.1").unwrap();
    assert_eq!(*matched.value, "first");
    assert_eq!(matched.params.get("id"), Some("1"));
    assert_eq!(matched.params.get("name"), None);
    assert_eq!(trie.len(), 1);
}

#[test]
fn router_surfaces_conflicts() {
    let mut router: Router = Router::new();
    router.route("students.{id}", |_| Ok(())).unwrap();

    assert_eq!(
        router.route("students.{sid}", |_| Ok(())),
        Err(conflict("students.{sid}", "students.{id}"))
    );
    assert_eq!(
        router.route_fmt("students.{}.{}", &[&1], |_| Ok(())),
        Err(InsertError::Format(FormatError::MissingArgument { index: 1 }))
    );
    assert_eq!(
        router.route_fmt("students.{}", &[&1, &2], |_| Ok(())),
        Err(InsertError::Format(FormatError::UnusedArguments {
            expected: 1,
            got: 2
        }))
    );
    assert_eq!(router.len(), 1);
}
