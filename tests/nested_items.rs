use microdata::microdata;

#[test]
fn test_nested_item_appears_embedded_and_top_level() {
    let items = microdata(
        r#"
        <article itemscope itemtype="http://schema.org/BlogPosting">
            <h1 itemprop="headline">On Widgets</h1>
            <div itemprop="author" itemscope itemtype="http://schema.org/Person">
                <span itemprop="name">Jane Roe</span>
            </div>
        </article>
    "#,
    );

    // One entry for the article, one for the nested person.
    assert_eq!(items.len(), 2);

    let post = &items[0];
    assert_eq!(post.item_type.as_deref(), Some("BlogPosting"));
    assert_eq!(post.get("headline").and_then(|v| v.as_text()), Some("On Widgets"));

    let author = post
        .get("author")
        .and_then(|v| v.as_item())
        .expect("Expected author to be a nested item");
    assert_eq!(author.item_type.as_deref(), Some("Person"));
    assert_eq!(author.get("name").and_then(|v| v.as_text()), Some("Jane Roe"));

    // The top-level twin is the same item by value.
    assert_eq!(&items[1], author);
}

#[test]
fn test_nested_properties_are_not_hoisted() {
    let items = microdata(
        r#"
        <div itemscope itemtype="http://schema.org/BlogPosting">
            <span itemprop="name">The Post</span>
            <div itemprop="author" itemscope itemtype="http://schema.org/Person">
                <span itemprop="name">Jane Roe</span>
            </div>
        </div>
    "#,
    );

    // The outer "name" is the post's own, never the person's.
    let post = &items[0];
    assert_eq!(post.get("name").and_then(|v| v.as_text()), Some("The Post"));
    assert!(post.get("name").unwrap().as_list().is_none());
}

#[test]
fn test_repeated_nested_items_become_a_list() {
    let items = microdata(
        r#"
        <article itemscope itemtype="http://schema.org/BlogPosting">
            <h1 itemprop="headline">On Widgets</h1>
            <div itemprop="comment" itemscope itemtype="http://schema.org/Comment">
                <span itemprop="text">First!</span>
            </div>
            <div itemprop="comment" itemscope itemtype="http://schema.org/Comment">
                <span itemprop="text">Nice post.</span>
            </div>
        </article>
    "#,
    );

    // Article plus two comments.
    assert_eq!(items.len(), 3);

    let comments = items[0]
        .get("comment")
        .and_then(|v| v.as_list())
        .expect("Expected repeated comments to become a list");

    assert_eq!(comments.len(), 2);
    let first = comments[0].as_item().expect("Expected a nested comment item");
    let second = comments[1].as_item().expect("Expected a nested comment item");
    assert_eq!(first.get("text").and_then(|v| v.as_text()), Some("First!"));
    assert_eq!(second.get("text").and_then(|v| v.as_text()), Some("Nice post."));
}

#[test]
fn test_three_levels_of_nesting() {
    let items = microdata(
        r#"
        <div itemscope itemtype="http://schema.org/BlogPosting">
            <div itemprop="author" itemscope itemtype="http://schema.org/Person">
                <span itemprop="name">Jane Roe</span>
                <div itemprop="worksFor" itemscope itemtype="http://schema.org/Organization">
                    <span itemprop="name">Acme</span>
                </div>
            </div>
        </div>
    "#,
    );

    // Post, person, organization.
    assert_eq!(items.len(), 3);

    let author = items[0]
        .get("author")
        .and_then(|v| v.as_item())
        .expect("Expected author item");
    let employer = author
        .get("worksFor")
        .and_then(|v| v.as_item())
        .expect("Expected worksFor item");

    assert_eq!(employer.item_type.as_deref(), Some("Organization"));
    assert_eq!(employer.get("name").and_then(|v| v.as_text()), Some("Acme"));
    assert_eq!(&items[2], employer);
}

#[test]
fn test_mixed_scalar_and_nested_values_under_one_name() {
    let items = microdata(
        r#"
        <div itemscope>
            <span itemprop="related">plain text</span>
            <div itemprop="related" itemscope itemtype="http://schema.org/Thing">
                <span itemprop="name">A Thing</span>
            </div>
        </div>
    "#,
    );

    let related = items[0]
        .get("related")
        .and_then(|v| v.as_list())
        .expect("Expected mixed values to become a list");

    assert_eq!(related.len(), 2);
    assert_eq!(related[0].as_text(), Some("plain text"));
    let thing = related[1].as_item().expect("Expected a nested item");
    assert_eq!(thing.get("name").and_then(|v| v.as_text()), Some("A Thing"));
}
